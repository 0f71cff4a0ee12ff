pub mod article_content;

pub use article_content::extract_article_content;

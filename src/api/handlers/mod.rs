pub mod article_content;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use news_relay::http::ErrorResponse;
use news_relay::news::types::{DEFAULT_LANGUAGE, DEFAULT_SORT_BY};
use news_relay::Article;

#[derive(Parser)]
#[command(name = "news-cli")]
#[command(about = "Search news through a running news-relay", long_about = None)]
struct Cli {
    /// Base URL of the relay
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Article language (ar, de, en, es, fr, he, it, nl, no, pt, ru, sv, ud, zh)
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Sort order: relevancy, popularity or publishedAt
    #[arg(short, long, default_value = DEFAULT_SORT_BY)]
    sort_by: String,

    /// Search keyword
    keyword: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.keyword.trim().is_empty() {
        eprintln!("Error: keyword must not be empty");
        return Ok(ExitCode::FAILURE);
    }

    let res = reqwest::Client::new()
        .get(format!("{}/api/news", cli.url.trim_end_matches('/')))
        .query(&[
            ("keyword", cli.keyword.as_str()),
            ("language", cli.language.as_str()),
            ("sortBy", cli.sort_by.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        render_error(&mut io::stderr().lock(), status.as_u16(), &text)?;
        return Ok(ExitCode::FAILURE);
    }

    let articles: Vec<Article> = serde_json::from_str(&text)?;
    render_articles(&mut io::stdout().lock(), &articles, &cli.keyword, &cli.language)?;

    Ok(ExitCode::SUCCESS)
}

fn render_articles(
    out: &mut impl Write,
    articles: &[Article],
    keyword: &str,
    language: &str,
) -> io::Result<()> {
    if articles.is_empty() {
        return writeln!(
            out,
            "No news found for \"{}\" in {}.",
            keyword,
            language.to_uppercase()
        );
    }

    for article in articles {
        writeln!(out, "{}", article.title.as_deref().unwrap_or("(untitled)"))?;
        writeln!(
            out,
            "  {}",
            article.description.as_deref().unwrap_or("No description")
        )?;
        if let Some(url) = &article.url {
            writeln!(out, "  {}", url)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_error(out: &mut impl Write, status: u16, body: &str) -> io::Result<()> {
    writeln!(out, "Error: relay returned status {}", status)?;
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => writeln!(out, "{}: {}", err.error, err.details),
        Err(_) => writeln!(out, "Response: {}", body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(articles: &[Article]) -> String {
        let mut out = Vec::new();
        render_articles(&mut out, articles, "bitcoin", "en").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_result_message() {
        assert_eq!(render(&[]), "No news found for \"bitcoin\" in EN.\n");
    }

    #[test]
    fn test_article_without_description() {
        let article = Article {
            title: Some("Headline".into()),
            description: None,
            url: Some("https://news.example/1".into()),
            image_url: None,
        };
        assert_eq!(
            render(&[article]),
            "Headline\n  No description\n  https://news.example/1\n\n"
        );
    }

    #[test]
    fn test_untitled_article_without_url() {
        let article = Article {
            title: None,
            description: Some("Body".into()),
            url: None,
            image_url: None,
        };
        assert_eq!(render(&[article]), "(untitled)\n  Body\n\n");
    }

    #[test]
    fn test_error_envelope_is_unwrapped() {
        let mut out = Vec::new();
        render_error(
            &mut out,
            500,
            r#"{"error":"Internal server error","details":"Failed to fetch news: timeout"}"#,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: relay returned status 500\nInternal server error: Failed to fetch news: timeout\n"
        );
    }

    #[test]
    fn test_non_json_error_body_is_shown_raw() {
        let mut out = Vec::new();
        render_error(&mut out, 502, "Bad Gateway").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: relay returned status 502\nResponse: Bad Gateway\n"
        );
    }
}

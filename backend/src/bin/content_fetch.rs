//! Fetch agency site content from the content repository and print it as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use agency_content::domain::{BlogPostFilters, ContactSubmission};
use agency_content::outbound::content_api::ReqwestContentTransport;
use agency_content::{ContentApiSettings, ContentClient, ContentError};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use serde_json::Value;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `content-fetch` command arguments.
///
/// Connection settings come from `CONTENT_API_BASE_URL`,
/// `CONTENT_API_API_TOKEN` and `CONTENT_API_TIMEOUT_SECONDS`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "content-fetch",
    about = "Read published agency site content from the content repository",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Fetch a marketing page by slug.
    Page { slug: String },
    /// List About sections in display order.
    About,
    /// List blog posts, newest first.
    Posts {
        /// Only posts in this category.
        #[arg(long)]
        category: Option<String>,
        /// Only posts with this tag.
        #[arg(long)]
        tag: Option<String>,
        /// Return at most this many posts.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Fetch a blog post by slug.
    Post { slug: String },
    /// List case studies.
    CaseStudies,
    /// Fetch a case study by slug.
    CaseStudy { slug: String },
    /// List job openings.
    Jobs,
    /// Fetch site-wide settings.
    Settings,
    /// Fetch a brand story by slug.
    BrandStory { slug: String },
    /// Submit a contact inquiry.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ContentApiSettings::load_from_iter([OsString::from("content-fetch")])
        .map_err(|error| eyre!("failed to load content API settings: {error}"))?;
    let config = settings
        .resolve()
        .wrap_err("invalid content API settings")?;
    let transport =
        ReqwestContentTransport::new(config).wrap_err("failed to build HTTP client")?;
    let client = ContentClient::new(Arc::new(transport), Arc::new(DefaultClock));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;

    match runtime.block_on(run(&client, args.command)) {
        Ok(output) => {
            let rendered =
                serde_json::to_string_pretty(&output).wrap_err("failed to render output")?;
            writeln!(io::stdout().lock(), "{rendered}").wrap_err("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => match failure.downcast_ref::<ContentError>() {
            Some(error) => {
                report(error).wrap_err("failed to write error report")?;
                Ok(ExitCode::FAILURE)
            }
            None => Err(failure),
        },
    }
}

/// Run one command. Repository failures surface as a [`ContentError`] inside
/// the report; anything else is a local fault of this tool.
async fn run(client: &ContentClient, command: Command) -> Result<Value> {
    match command {
        Command::Page { slug } => to_json(&client.get_page_by_slug(&slug).await?),
        Command::About => to_json(client.get_about_sections().await?.items()),
        Command::Posts {
            category,
            tag,
            limit,
        } => {
            let filters = BlogPostFilters {
                category,
                tag,
                limit,
            };
            to_json(client.get_blog_posts(&filters).await?.items())
        }
        Command::Post { slug } => to_json(&client.get_blog_post_by_slug(&slug).await?),
        Command::CaseStudies => to_json(client.get_case_studies().await?.items()),
        Command::CaseStudy { slug } => to_json(&client.get_case_study_by_slug(&slug).await?),
        Command::Jobs => to_json(client.get_job_listings().await?.items()),
        Command::Settings => to_json(&client.get_site_settings().await?),
        Command::BrandStory { slug } => to_json(&client.get_brand_story_by_slug(&slug).await?),
        Command::Contact {
            name,
            email,
            message,
            company,
            phone,
        } => {
            client
                .submit_contact_form(ContactSubmission {
                    name,
                    email,
                    company,
                    phone,
                    message,
                })
                .await?;
            Ok(serde_json::json!({ "submitted": true }))
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).wrap_err("failed to render output")
}

fn report(error: &ContentError) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{}", error.user_message())?;
    writeln!(
        stderr,
        "classification: {:?} (status {}): {}",
        error.kind(),
        error.status(),
        error.message()
    )?;
    if let Some(details) = error.details() {
        writeln!(stderr, "details: {details}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use agency_content::domain::ErrorKind;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn content_renders_as_json() {
        let rendered = to_json(&json!({ "title": "Home" })).expect("serialisable");

        assert_eq!(rendered, json!({ "title": "Home" }));
    }

    #[rstest]
    fn render_failures_are_not_repository_errors() {
        let unrenderable = BTreeMap::from([((1_u8, 2_u8), "tuple keys")]);

        let failure = to_json(&unrenderable).expect_err("tuple map keys are not JSON");

        assert!(failure.downcast_ref::<ContentError>().is_none());
        assert!(failure.to_string().contains("failed to render output"));
    }

    #[rstest]
    fn repository_errors_survive_the_report() {
        let failure = color_eyre::eyre::Report::new(ContentError::not_found());

        let error = failure
            .downcast_ref::<ContentError>()
            .expect("content error is recoverable");

        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}

use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod chart;
pub(crate) mod config;
pub(crate) mod hn_api;
pub(crate) mod html;
pub(crate) mod report;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short = 'n', long, default_value = "5")]
    #[arg(help = "Number of top stories to fetch")]
    limit: usize,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Convert comment HTML to plain text")]
    plain_text: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,

    #[arg(long)]
    #[arg(help = "Override the API base URL, e.g. https://hacker-news.firebaseio.com/v0")]
    base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) title: String,
    pub(crate) url: Option<String>,
    pub(crate) score: i64,
    pub(crate) author: String,
    pub(crate) created_at: i64,
    pub(crate) id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Comment {
    pub(crate) author: Option<String>,
    pub(crate) text: Option<String>,
    /// Only required once the comment is printed.
    pub(crate) created_at: Option<i64>,
}

/// Fetches the top `limit` stories, prints each with its first comments and
/// finishes with a histogram of their scores.
async fn explore(
    base_url: &str,
    limit: usize,
    options: report::RenderOptions,
    out: &mut impl std::io::Write,
) -> anyhow::Result<Vec<Post>> {
    report::write_header(out, limit)?;

    let posts = hn_api::get_top_posts(base_url, limit).await?;
    tracing::info!(
        num_posts = posts.len(),
        ids =? posts.iter().map(|p| p.id).collect::<Vec<_>>(),
        "Got top posts"
    );

    for (index, post) in posts.iter().enumerate() {
        let comments = hn_api::get_comments(base_url, post.id).await?;
        report::write_post(out, index + 1, post, &comments, options)?;
    }

    chart::plot_score_distribution(out, &posts)?;
    out.flush()?;

    Ok(posts)
}

fn log_file_writer(
    log_dir: impl AsRef<std::path::Path>,
) -> (
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
) {
    let file_appender = tracing_appender::rolling::daily(log_dir, "hn_explorer.log");
    tracing_appender::non_blocking(file_appender)
}

fn subscriber(
    file_writer: tracing_appender::non_blocking::NonBlocking,
    log_to_console: bool,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    // stdout carries the report.
    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    tracing_subscriber::registry()
        .with(file_layer)
        .with(log_to_console.then_some(pretty_layer))
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    use clap::Parser;
    let args = Args::parse();

    // Buffered lines only reach the file when the guard drops, so it must live
    // until main returns.
    let (file_writer, _guard) = log_file_writer(&config::config().log_dir);
    subscriber(
        file_writer,
        config::config().log_to_console || args.log_to_console,
    )
    .init();

    tracing::info!(
        config =? config::config(),
        args =? args,
        "Starting HN Explorer"
    );

    let base_url = args
        .base_url
        .as_deref()
        .map(|url| url.trim_end_matches('/'))
        .unwrap_or(config::config().api_base_url.as_str());
    let options = report::RenderOptions {
        plain_text: args.plain_text,
    };

    match explore(base_url, args.limit, options, &mut std::io::stdout()).await {
        Ok(posts) => {
            tracing::info!(num_posts = posts.len(), "HN Explorer finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error =? e, "Error when exploring top stories");
            eprintln!("Error: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

use std::io::Write;
use std::net::SocketAddr;
use std::process;
use std::time::Duration;

use axum::http::StatusCode;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use lapbytes::api::{self, fetch_page, ApiClient};
use lapbytes::catalog::page::LOADING_LABEL;
use lapbytes::catalog::{
    render, Action, CatalogBrowser, Effect, FetchTicket, GridEvent, LoadMode, LoadOutcome, Page,
    PaginationState, RenderOutcome, PAGE_SIZE,
};
use lapbytes::config;
use lapbytes::fixture::{self, FixtureState};
use lapbytes::terminal;

#[derive(Parser)]
#[command(
    name = "lapbytes",
    author,
    version,
    about = "Browse the Lapbytes laptop catalog",
    long_about = r#"Lapbytes: browse the laptop catalog from your terminal.

The catalog is fetched six laptops at a time from the API configured with
API_BASE_URL (or --api-base-url). Use `serve-fixture` to run a local copy of
the API backed by a JSON file.

Examples:
  1) Run a local API with the bundled sample catalog:
      lapbytes serve-fixture --port 5050
  2) Browse it:
      lapbytes browse --api-base-url http://127.0.0.1:5050
  3) Print page 2 as card markup:
      lapbytes fetch --page 2 --html
"#,
    after_help = "Use `lapbytes <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively
    Browse {
        /// Catalog API base URL (overrides API_BASE_URL)
        #[arg(long)]
        api_base_url: Option<String>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Treat the page shell as already having a Load More control
        #[arg(long)]
        existing_control: bool,
    },
    /// Fetch one page and print it
    Fetch {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Print card markup instead of a table
        #[arg(long)]
        html: bool,
        #[arg(long)]
        api_base_url: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Serve a local copy of the catalog API from a JSON file
    #[command(
        about = "Serve a local catalog API for development.",
        long_about = "Serve GET /api/products/{limit}/{page} and GET /api/product/{id} from a JSON file (an array of products or {\"products\": [...]}). Without --file the bundled sample catalog is served."
    )]
    ServeFixture {
        /// Host to bind to (overrides FIXTURE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides FIXTURE_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Product JSON file
        #[arg(long)]
        file: Option<String>,
        /// Artificial latency per request, in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Answer every request with this HTTP status (e.g. 500)
        #[arg(long)]
        fail_status: Option<u16>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Validate configuration and ensure API connectivity
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
}

fn build_client(env_file: Option<&str>, api_base_url: Option<String>) -> ApiClient {
    config::load_env_file(env_file);
    let base_url = api_base_url.unwrap_or_else(config::get_api_base_url);
    match ApiClient::with_timeout(&base_url, config::get_request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    }
}

fn describe_outcome(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Rendered(RenderOutcome::Replaced(n)) => {
            println!("{}", yansi::Paint::new(format!("Loaded {} laptops", n)).green());
        }
        LoadOutcome::Rendered(RenderOutcome::Appended(n)) => {
            println!("{}", yansi::Paint::new(format!("Loaded {} more laptops", n)).green());
        }
        LoadOutcome::Rendered(RenderOutcome::Placeholder) => {}
        LoadOutcome::Rendered(RenderOutcome::Unchanged) => {
            println!("{}", yansi::Paint::new("No more laptops on that page").yellow());
        }
        LoadOutcome::Skipped => {
            println!("{}", yansi::Paint::new("Nothing more to load").yellow());
        }
        LoadOutcome::Stale => {}
        LoadOutcome::Failed(e) => {
            tracing::debug!(%e, "Load failed");
        }
    }
}

/// Await a dispatched page with a spinner showing the control's label.
async fn run_ticket(browser: &mut CatalogBrowser, ticket: FetchTicket) -> LoadOutcome {
    let label = browser
        .page()
        .load_more
        .as_ref()
        .map(|c| c.label())
        .unwrap_or(LOADING_LABEL);
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(label.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = browser.fetch(ticket.request()).await;
    spinner.finish_and_clear();
    browser.finish(ticket, result)
}

fn print_browse_help() {
    println!(
        "{}",
        yansi::Paint::new(
            "Commands: more | cart <id> | wish <id> | open <id> | retry | html | help | quit"
        )
        .dim()
    );
}

async fn show_effect(browser: &CatalogBrowser, effect: Effect) {
    match effect {
        Effect::CartUpdated(count) => {
            println!("{} {}", yansi::Paint::new("Cart:").green(), count);
        }
        Effect::Ignored => {
            println!("{}", yansi::Paint::new("That button is disabled").yellow());
        }
        Effect::NotImplemented(action) => {
            println!("{} ({})", yansi::Paint::new("Not available yet").yellow(), action);
        }
        Effect::Navigate { id, href } => {
            println!("{} {}", yansi::Paint::new("→").cyan(), href);
            match browser.product_detail(id).await {
                Ok(product) => println!("\n{}\n", terminal::product_detail_table(&product)),
                Err(e) => eprintln!("{}: {}", yansi::Paint::new("Failed to load product").red(), e),
            }
        }
        Effect::Loaded(outcome) => {
            describe_outcome(&outcome);
            terminal::print_grid(browser.page());
        }
    }
}

async fn run_browse(api: ApiClient, existing_control: bool) {
    let shell = if existing_control { Page::new().with_load_more() } else { Page::new() };
    let mut browser = CatalogBrowser::new(api, shell);
    if browser.bootstrap() {
        tracing::debug!("Created Load More control after the grid");
    }

    let ticket = browser.begin_initial_load();
    let outcome = run_ticket(&mut browser, ticket).await;
    describe_outcome(&outcome);
    terminal::print_grid(browser.page());
    println!("{}", terminal::status_line(&browser));
    print_browse_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", yansi::Paint::new(">").cyan().bold());
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(%e, "Failed to read from stdin");
                break;
            }
        };
        let mut parts = line.split_whitespace();
        let command = parts.next();
        let arg = parts.next();

        let event = match command {
            None => continue,
            Some("quit") | Some("q") | Some("exit") => break,
            Some("help") | Some("?") => {
                print_browse_help();
                continue;
            }
            Some("html") => {
                match browser.page().to_html() {
                    Ok(html) => println!("{}", html),
                    Err(e) => eprintln!("{}: {}", yansi::Paint::new("Template render error").red(), e),
                }
                continue;
            }
            Some("more") | Some("m") => {
                match browser.begin_load_more() {
                    Some(ticket) => {
                        let outcome = run_ticket(&mut browser, ticket).await;
                        describe_outcome(&outcome);
                        terminal::print_grid(browser.page());
                    }
                    None => describe_outcome(&LoadOutcome::Skipped),
                }
                println!("{}", terminal::status_line(&browser));
                continue;
            }
            Some("retry") => {
                let ticket = browser.begin_initial_load();
                let outcome = run_ticket(&mut browser, ticket).await;
                describe_outcome(&outcome);
                terminal::print_grid(browser.page());
                println!("{}", terminal::status_line(&browser));
                continue;
            }
            Some("cart") => GridEvent::new(Action::AddToCart.as_str(), arg),
            Some("wish") => GridEvent::new(Action::ToggleWishlist.as_str(), arg),
            Some("open") => GridEvent::new(Action::OpenProduct.as_str(), arg),
            // Raw attribute form: `<data-action> [data-product-id]`
            Some(other) => GridEvent::new(other, arg),
        };

        match browser.dispatch(&event).await {
            Ok(effect) => show_effect(&browser, effect).await,
            Err(e) => eprintln!("{}", yansi::Paint::new(e.to_string()).red()),
        }
        println!("{}", terminal::status_line(&browser));
    }
}

async fn run_fetch(api: ApiClient, page_number: u32, html: bool) {
    let products = match fetch_page(&api, page_number.max(1), PAGE_SIZE).await {
        Ok(products) => products,
        Err(e) => {
            eprintln!("{} ({})", yansi::Paint::new(e.user_message()).red(), e);
            process::exit(1);
        }
    };

    let mut page = Page::new();
    let mut state = PaginationState::default();
    if let Err(e) = render(&mut page, &mut state, &products, LoadMode::Replace) {
        tracing::error!(%e, "Template render error");
        eprintln!("{}: {}", yansi::Paint::new("Template render error").red(), e);
        process::exit(1);
    }

    if html {
        println!("{}", page.grid.to_html());
    } else {
        terminal::print_grid(&page);
        if state.has_more() {
            println!("{}", yansi::Paint::new(format!("More may follow: --page {}", page_number.max(1) + 1)).dim());
        }
    }
}

async fn run_serve_fixture(
    host: String,
    port: u16,
    file: Option<String>,
    delay_ms: u64,
    fail_status: Option<u16>,
) {
    let products = match &file {
        Some(path) => fixture::load_products_file(std::path::Path::new(path)).await,
        None => fixture::parse_products(fixture::SAMPLE_PRODUCTS),
    };
    let products = match products {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(%e, "Failed to load fixture products");
            eprintln!("{}: {}", yansi::Paint::new("Failed to load fixture products").red(), e);
            process::exit(1);
        }
    };

    let mut state = FixtureState::new(products).with_delay(Duration::from_millis(delay_ms));
    if let Some(code) = fail_status {
        match StatusCode::from_u16(code) {
            Ok(status) => state = state.failing(status),
            Err(e) => {
                eprintln!("{}: {}", yansi::Paint::new("Invalid --fail-status").red(), e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::new("Invalid host/port format").red(), e);
            process::exit(1);
        }
    };
    println!(
        "{} {}",
        yansi::Paint::new("Catalog fixture API running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    if let Err(e) = fixture::serve(state, addr).await {
        tracing::error!(%e, "Fixture server failed");
        eprintln!(
            "{}: {}\n{}",
            yansi::Paint::new(format!("Failed to serve on {}", addr)).red(),
            e,
            yansi::Paint::new("Please stop any process using this port, or pass a different --port value.").yellow()
        );
        process::exit(1);
    }
}

async fn run_check_config(env_file: Option<String>) {
    let api = build_client(env_file.as_deref(), None);
    println!("API_BASE_URL: {}", yansi::Paint::new(api.base_url()).cyan());
    println!("API_TIMEOUT_SECS: {}", config::get_request_timeout().as_secs());
    match api::fetch_page(&api, 1, PAGE_SIZE).await {
        Ok(products) => {
            println!(
                "{}",
                yansi::Paint::new(format!("Configuration looks valid ({} products on page 1)", products.len())).green()
            );
        }
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::client::set_silent(true);
    }

    match cli.command {
        None => {
            let api = build_client(None, None);
            run_browse(api, false).await;
        }
        Some(Commands::Browse { api_base_url, env_file, existing_control }) => {
            let api = build_client(env_file.as_deref(), api_base_url);
            run_browse(api, existing_control).await;
        }
        Some(Commands::Fetch { page, html, api_base_url, env_file }) => {
            let api = build_client(env_file.as_deref(), api_base_url);
            run_fetch(api, page, html).await;
        }
        Some(Commands::ServeFixture { host, port, file, delay_ms, fail_status, env_file }) => {
            config::load_env_file(env_file.as_deref());
            let host = host.unwrap_or_else(config::get_fixture_host);
            let port = port.unwrap_or_else(config::get_fixture_port);
            run_serve_fixture(host, port, file, delay_ms, fail_status).await;
        }
        Some(Commands::CheckConfig { env_file }) => {
            run_check_config(env_file).await;
        }
    }
}

//! ojfront - Command Line Entry Point
//!
//! Small operator tool around the library:
//!
//! ```text
//! ojfront version          print the build stamp
//! ojfront routes           list the admin route table
//! ojfront route <path>     resolve a browser location
//! ojfront get <path>       GET an API path and print `data`
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ojfront::{
    config::CONFIG,
    notify::{TracingNotifier, TracingStore},
    router::{RouteTable, RouteTarget},
    transport::ApiRequest,
    version::BuildInfo,
    OjApi,
};

const USAGE: &str = "usage: ojfront <version | routes | route <path> | get <path>>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.log.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if CONFIG.log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["version"] => {
            let info = BuildInfo::current(&CONFIG.build);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        ["routes"] => {
            let table = RouteTable::admin()?;
            for route in table.routes() {
                let target = match route.target {
                    RouteTarget::View(view) => view.to_string(),
                    RouteTarget::Redirect(to) => format!("-> {}", to),
                };
                println!(
                    "{:<64} {:<24} {}",
                    route.path,
                    route.name.unwrap_or("-"),
                    target
                );
            }
        }
        ["route", location] => {
            let table = RouteTable::admin()?;
            let resolved = table
                .resolve_location(location)
                .with_context(|| format!("resolving {}", location))?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        ["get", path] => {
            tracing::info!(base = %CONFIG.api.base_url, %path, "sending request");
            let api = OjApi::connect(
                &CONFIG.api,
                Arc::new(TracingNotifier),
                Arc::new(TracingStore),
            )?;
            let envelope = api.dispatcher().dispatch(ApiRequest::get(*path)).await?;
            println!("{}", serde_json::to_string_pretty(&envelope.data)?);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

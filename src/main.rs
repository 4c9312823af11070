use log::{debug, error};
use std::env;
use std::process::ExitCode;

use recipe_scrapbook::{load_config, Resolution, Resolver};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the URL from command-line arguments
    let args: Vec<String> = env::args().collect();
    let url = args.get(1).ok_or("Please provide a URL as an argument")?;

    let config = load_config()?;
    let credentials = config.credentials.clone();
    let resolver = Resolver::builder().config(config).build()?;

    let classification = match resolver.classify(url) {
        Ok(classification) => classification,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!("{:#?}", classification);

    let metadata = resolver.resolve_metadata(&classification, &credentials).await;
    let draft = Resolution {
        classification,
        metadata,
    }
    .into_draft();

    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(ExitCode::SUCCESS)
}

#![doc = include_str!("../README.md")]

use {
    chrono::{Days, Local, NaiveDate},
    clap::Parser,
    colored::Colorize,
    pvpc_exporter::{config::DEFAULT_CONFIG_PATH, Config, Exporter, RetryingTransport},
    reqwest::Client,
    std::{path::PathBuf, time::Duration},
};

/// Timeout applied to every HTTP request, connection included.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(
    version,
    about = "Export hourly PVPC electricity prices to InfluxDB"
)]
struct Cli {
    /// Export the prices of this many days ago. 0 is today.
    #[arg(long, default_value_t = 0)]
    days: u32,

    /// Path to the JSON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Customize parsing error handling.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    println!("{}", e);

                    std::process::exit(0);
                }
                _ => (),
            }

            eprintln!("{ballot} {e}", ballot = "✘".red().bold());

            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = export(cli).await {
        eprintln!("{ballot} {e}", ballot = "✘".red().bold());

        std::process::exit(1);
    }
}

async fn export(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from_path(&cli.config).await?;
    log::debug!("Loaded {config:?}");

    let date = target_date(Local::now().date_naive(), cli.days)?;

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(HTTP_TIMEOUT)
        .build()?;
    let exporter = Exporter::new(config, RetryingTransport::new(client));

    let summary = exporter.run(date).await?;

    println!(
        "{check} Exported {lines} PVPC prices for {date}",
        check = "✔".green().bold(),
        lines = summary.lines,
        date = summary.date,
    );

    Ok(())
}

/// The calendar day `days` before `today`.
fn target_date(today: NaiveDate, days: u32) -> anyhow::Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| anyhow::anyhow!("Cannot go back {days} days from {today}"))
}

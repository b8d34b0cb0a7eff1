use env_logger::Env;
use sitefinder::{configuration::get_configuration, services::RunOutcome, startup::run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    let tab_name = configuration.sheet_tab_name.clone();

    match run(configuration).await? {
        RunOutcome::NoData => println!("No data found in {}.", tab_name),
        RunOutcome::NothingToUpdate => {
            println!("Nothing to update (no eligible COMPANY rows with blank website).")
        }
        RunOutcome::Completed(summary) => println!(
            "Done. Processed {} companies; wrote {} websites; updated {} rows.",
            summary.processed, summary.websites_found, summary.rows_updated
        ),
    }

    Ok(())
}

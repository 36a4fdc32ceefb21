// Entry point and high-level CLI flow.
//
// - Option [1] loads the backend list exports and prints diagnostics.
// - Option [2] generates the four reports and a JSON dashboard summary.
// - Option [3] drops the loaded data.
// - After generating reports, the user can choose to go back to the
//   selection menu or exit.
use contrib_metrics::config::Config;
use contrib_metrics::loader;
use contrib_metrics::output;
use contrib_metrics::reports;
use contrib_metrics::state::{Action, AppState};
use contrib_metrics::util;
use contrib_metrics::MetricsResult;
use std::io::{self, Write};

/// Read a single line of input after printing the common "Enter choice:" prompt.
///
/// Returns `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Ask the user whether to go back to the menu after generating reports.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load every list export from the data directory.
fn handle_load(state: AppState) -> AppState {
    match loader::load_dataset(&state.config.data_dir) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} contributions, {} sponsors, {} expenses, {} campaigns)",
                util::format_int(data.contributions.len()),
                util::format_int(data.sponsors.len()),
                util::format_int(data.expenses.len()),
                util::format_int(data.campaigns.len())
            );
            for line in report.notes() {
                println!("{}", line);
            }
            println!();
            state.reduce(Action::Loaded(data, report))
        }
        Err(e) => {
            log::error!("Loading {} failed: {}", state.config.data_dir.display(), e);
            eprintln!("Failed to load data: {}\n", e);
            state
        }
    }
}

/// Handle option [2]: generate all reports and the JSON summary.
///
/// Writes four CSV files and `summary.json` to the output directory and
/// prints Markdown previews of each report.
fn handle_generate_reports(state: &AppState) -> MetricsResult<()> {
    let Some(data) = state.data.as_ref() else {
        println!("Error: No data loaded. Please load the data first (option 1).\n");
        return Ok(());
    };
    let cfg = &state.config;
    output::ensure_dir(&cfg.output_dir)?;

    println!("Generating reports...");
    println!("Outputs saved to {}\n", cfg.output_dir.display());

    let set = reports::generate_reports(data, &cfg.festival, cfg.top_donors);

    let file1 = cfg.output_dir.join("report1_donor_rollup.csv");
    output::write_csv(&file1, &set.donors)?;
    println!("Report 1: Donor Roll-up");
    println!("(Ranked by Total Contributed)\n");
    output::preview_table_rows(&set.donors, cfg.preview_rows);
    println!("(Full table exported to {})\n", file1.display());

    let file2 = cfg.output_dir.join("report2_campaign_progress.csv");
    output::write_csv(&file2, &set.campaigns)?;
    println!("Report 2: Campaign Progress");
    println!("(Progress capped at 100%)\n");
    output::preview_table_rows(&set.campaigns, cfg.preview_rows);
    println!("(Full table exported to {})\n", file2.display());

    let file3 = cfg.output_dir.join("report3_expense_breakdown.csv");
    output::write_csv(&file3, &set.breakdown)?;
    println!("Report 3: Expense Breakdown");
    println!("({})\n", reports::festival_caption(data, &cfg.festival));
    output::preview_table_rows(&set.breakdown, cfg.preview_rows);
    println!("(Full table exported to {})\n", file3.display());

    let file4 = cfg.output_dir.join("report4_outstanding_payments.csv");
    output::write_csv(&file4, &set.outstanding)?;
    println!("Report 4: Outstanding Payments");
    println!("(Total outstanding: {})\n", util::format_number(set.total_outstanding, 2));
    output::preview_table_rows(&set.outstanding, cfg.preview_rows);
    println!("(Full table exported to {})\n", file4.display());

    output::write_json(&cfg.output_dir.join("summary.json"), &set.summary)?;
    println!("Summary Stats (summary.json):");
    println!(
        "{{\"totalRaised\": {}, \"netBalance\": {}, \"donorCount\": {}}}\n",
        util::format_number(set.summary.totals.total_raised, 2),
        util::format_number(set.summary.net_balance, 2),
        util::format_int(set.summary.donor_count)
    );
    Ok(())
}

fn main() {
    // Read config first so RUST_LOG may come from `.env`.
    let config = Config::from_env();
    env_logger::init();
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    log::debug!("Using configuration {:?}", config);
    let mut state = AppState::new(config);

    loop {
        println!("Contribution Metrics:");
        println!("[1] Load the data");
        println!("[2] Generate Reports");
        println!("[3] Clear loaded data\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => {
                state = handle_load(state);
            }
            "2" => {
                println!();
                if let Err(e) = handle_generate_reports(&state) {
                    log::error!("Report generation failed: {}", e);
                    eprintln!("Write error: {}\n", e);
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                state = state.reduce(Action::Cleared);
                println!("Loaded data cleared.\n");
            }
            _ => {
                println!("Invalid choice. Please enter 1, 2 or 3.\n");
            }
        }
    }
}

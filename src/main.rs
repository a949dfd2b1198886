mod classifier;
mod cli;
mod client;
mod error;
mod fmt;
mod reports;
mod session;
mod settings;
mod sheet;

use clap::Parser;

use cli::{ApproveCommands, Cli, Commands, PayCommands, RequestCommands, TallyCommands};

fn main() {
    let cli = Cli::parse();
    let user = cli.user.clone();

    let result = match cli.command {
        Commands::Init {
            endpoint,
            sheet,
            folder,
            identifier,
        } => cli::init::run(endpoint, sheet, folder, identifier),
        Commands::Status => cli::status::run(),
        Commands::Request { command } => match command {
            RequestCommands::Submit {
                unique_no,
                unit,
                pay_to,
                amount,
                remarks,
                attach,
                pay_date,
            } => cli::request::submit(
                user.as_deref(),
                unique_no,
                unit,
                pay_to,
                amount,
                remarks,
                attach,
                pay_date,
            ),
            RequestCommands::List => cli::request::list(user.as_deref()),
        },
        Commands::Approve { command } => match command {
            ApproveCommands::List { history } => cli::approve::list(user.as_deref(), history),
            ApproveCommands::Grant {
                row,
                amount,
                remarks,
            } => cli::approve::decide(user.as_deref(), row, true, amount, remarks),
            ApproveCommands::Reject { row, remarks } => {
                cli::approve::decide(user.as_deref(), row, false, None, remarks)
            }
        },
        Commands::Pay { command } => match command {
            PayCommands::List { history } => cli::pay::list(user.as_deref(), history),
            PayCommands::Execute {
                row,
                payment_type,
                proof,
                date,
            } => cli::pay::execute(user.as_deref(), row, &payment_type, proof, date),
        },
        Commands::Tally { command } => match command {
            TallyCommands::List { history } => cli::tally::list(user.as_deref(), history),
            TallyCommands::Post { rows, all } => cli::tally::post(user.as_deref(), rows, all),
        },
        Commands::Dashboard => cli::dashboard::run(user.as_deref()),
        Commands::Export { output } => cli::export::run(user.as_deref(), output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

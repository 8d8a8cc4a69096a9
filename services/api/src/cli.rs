use crate::console::{
    run_employee_delete, run_employee_search, run_employer_delete, run_employer_search,
    run_request_list, run_request_respond, run_stats, DeleteArgs, EmployeeSearchArgs,
    EmployerSearchArgs, RequestListArgs, RespondArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruit Desk",
    about = "Review hire requests and search the applicant directory from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List or respond to hire requests
    Requests {
        #[command(subcommand)]
        command: RequestCommand,
    },
    /// Search registered applicants
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Search employer companies
    Employers {
        #[command(subcommand)]
        command: EmployerCommand,
    },
    /// Print the admin overview numbers
    Stats,
}

#[derive(Subcommand, Debug)]
enum RequestCommand {
    /// List hire requests, optionally narrowed to one status
    List(RequestListArgs),
    /// Accept or reject a pending hire request
    Respond(RespondArgs),
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    /// Filter the loaded applicants by free text
    Search(EmployeeSearchArgs),
    /// Permanently delete an applicant
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
enum EmployerCommand {
    /// Filter the loaded employer companies by free text
    Search(EmployerSearchArgs),
    /// Permanently delete an employer company (admin accounts are refused)
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Requests {
            command: RequestCommand::List(args),
        } => run_request_list(args).await,
        Command::Requests {
            command: RequestCommand::Respond(args),
        } => run_request_respond(args).await,
        Command::Employees {
            command: EmployeeCommand::Search(args),
        } => run_employee_search(args).await,
        Command::Employees {
            command: EmployeeCommand::Delete(args),
        } => run_employee_delete(args).await,
        Command::Employers {
            command: EmployerCommand::Search(args),
        } => run_employer_search(args).await,
        Command::Employers {
            command: EmployerCommand::Delete(args),
        } => run_employer_delete(args).await,
        Command::Stats => run_stats().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respond_requires_exactly_one_decision() {
        let parsed = Cli::try_parse_from([
            "recruit-desk",
            "requests",
            "respond",
            "7",
            "--accept",
            "--message",
            "Welcome aboard",
        ])
        .expect("accept parses");
        match parsed.command {
            Some(Command::Requests {
                command: RequestCommand::Respond(args),
            }) => {
                assert_eq!(args.request_id, 7);
                assert!(args.accept);
                assert_eq!(args.message, "Welcome aboard");
            }
            other => panic!("unexpected command {other:?}"),
        }

        let both = Cli::try_parse_from([
            "recruit-desk",
            "requests",
            "respond",
            "7",
            "--accept",
            "--reject",
            "--message",
            "x",
        ]);
        assert!(both.is_err());

        let neither =
            Cli::try_parse_from(["recruit-desk", "requests", "respond", "7", "--message", "x"]);
        assert!(neither.is_err());
    }

    #[test]
    fn search_collects_free_text_terms() {
        let parsed = Cli::try_parse_from([
            "recruit-desk",
            "employees",
            "search",
            "john",
            "lahore",
            "--limit",
            "50",
        ])
        .expect("search parses");
        match parsed.command {
            Some(Command::Employees {
                command: EmployeeCommand::Search(args),
            }) => {
                assert_eq!(args.query, vec!["john", "lahore"]);
                assert_eq!(args.limit, Some(50));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn delete_takes_id_and_confirmation_flag() {
        let parsed = Cli::try_parse_from(["recruit-desk", "employers", "delete", "8", "--yes"])
            .expect("delete parses");
        match parsed.command {
            Some(Command::Employers {
                command: EmployerCommand::Delete(args),
            }) => {
                assert_eq!(args.id, 8);
                assert!(args.yes);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let parsed = Cli::try_parse_from(["recruit-desk", "employees", "delete", "3"])
            .expect("delete without --yes parses");
        assert!(matches!(
            parsed.command,
            Some(Command::Employees {
                command: EmployeeCommand::Delete(DeleteArgs { yes: false, .. }),
            })
        ));
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let parsed = Cli::try_parse_from(["recruit-desk"]).expect("bare invocation parses");
        assert!(parsed.command.is_none());
    }
}

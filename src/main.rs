// src/main.rs

use query::cli::{self, Invocation};
use query::engine::{FATAL_EXIT_CODE, RunStatus};
use query::errors::QueryError;
use query::{logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run_main().await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            let silent = err.downcast_ref::<QueryError>().is_some_and(QueryError::is_silent);
            if !silent {
                eprintln!("query: {err}");
            }
            FATAL_EXIT_CODE
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<RunStatus> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let invocation = Invocation::try_from(args)?;
    Ok(run(invocation).await?)
}

use std::io;

use anyhow::Context;

use stockroom_cli::{Config, Prompter, Session};
use stockroom_inventory::Catalog;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid stockroom configuration")?;
    stockroom_observability::init(config.log_format, &config.log_filter);

    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        "starting stockroom session"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    let mut session = Session::new(Catalog::new(), config);

    session
        .run(&mut prompter)
        .context("terminal input/output failed")?;

    tracing::info!(items = session.catalog().len(), "session ended");
    Ok(())
}

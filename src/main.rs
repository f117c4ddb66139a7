use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use unireg_client::utils::logging;
use unireg_client::{App, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // 加载配置
    let config = cli.config();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let outcome = App::initialize(config)?.run(cli.command).await?;

    for line in &outcome.lines {
        println!("{}", line);
    }
    if let Some(route) = outcome.navigate {
        println!("→ {}", route);
    }

    Ok(())
}

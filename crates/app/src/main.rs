mod host;

use anyhow::{Context, Result};
use winstate_core::config::TrackerConfig;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn inner_main(config: &TrackerConfig) -> Result<()> {
    log::info!("配置已加载: {:?}", config);

    let final_state = host::run(config)?;
    log::info!("最后记录的窗口状态: {:?}", final_state);

    log::info!("winstate-demo 已退出");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let run_log_path = std::env::temp_dir().join("winstate_demo.log");
    let log_file = std::fs::File::create(&run_log_path)
        .with_context(|| format!("无法创建日志文件: {}", run_log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() {
    let err_log_path = std::env::temp_dir().join("winstate_fatal_err.log");

    let result = TrackerConfig::load()
        .context("加载配置失败")
        .and_then(|config| {
            init_logging(&config.log_level)?;
            log::info!("winstate-demo v{} 启动中...", APP_VERSION);
            inner_main(&config)
        });

    if let Err(e) = result {
        log::error!("致命错误导致应用退出: {:?}", e);
        eprintln!("winstate-demo: {:?}", e);
        std::fs::write(&err_log_path, format!("{:?}", e)).ok();
        std::process::exit(1);
    }
}

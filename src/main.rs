use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use textbook_distribution::configs;
use textbook_distribution::shell::Shell;
use textbook_distribution::store::FlatFileRepository;
use tracing::{error, info};

/// 교과서/유통사 관리 프로그램
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// 레코드를 저장하고 불러올 파일, 지정하지 않으면 설정의 data_file을 사용한다.
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    configs::load_dotenv();
    let cli = Cli::parse();

    let config = configs::load_config()
        .unwrap_or_else(|e| panic!("Cannot loading config: {}", e));
    let _guard = configs::logging::set_global_logging_config(config.logger())
        .unwrap_or_else(|e| panic!("Cannot set logging config: {}", e));

    let path = cli.file.unwrap_or_else(|| PathBuf::from(config.data_file()));
    info!(path = %path.display(), "starting shell");

    let repository = FlatFileRepository::new(path);
    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), repository);
    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "console i/o failed");
            ExitCode::FAILURE
        }
    }
}

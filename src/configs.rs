pub mod logging;

use serde::Deserialize;
use std::env;

/// 저장 파일을 따로 지정하지 않았을 때 사용하는 파일 이름
pub const DEFAULT_DATA_FILE: &str = "data.txt";

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    data_file: String,
    logger: Option<logging::Config>,
}

impl AppConfig {
    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    pub fn logger(&self) -> Option<&logging::Config> {
        self.logger.as_ref()
    }
}

/// 프로그램 설정을 읽는다.
///
/// 기본값, `config/<RUN_MODE>` 파일(없어도 됨), `TEXTBOOK__` 접두사 환경 변수 순으로 덮어쓴다.
/// 예) `TEXTBOOK__DATA_FILE=books.txt`, `TEXTBOOK__LOGGER__DIR=logs`
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .set_default("data_file", DEFAULT_DATA_FILE)?
        .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
        .add_source(config::Environment::with_prefix("TEXTBOOK").separator("__"))
        .build()?;

    config.try_deserialize()
}

use serde::Deserialize;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::LocalTime;

/// 로깅 설정 중 발생한 에러 열거
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("로그 레벨(level)은 TRACE, DEBUG, INFO, WARN, ERROR만 가능 합니다: {0}")]
    UnknownLevel(String),

    #[error("로깅 파일 로테이션(rotation)은 DAILY, HOURLY, MINUTELY, NEVER만 가능 합니다: {0}")]
    UnknownRotation(String),

    #[error("로그 파일을 생성할 수 없습니다: {0}")]
    AppenderInit(#[from] rolling::InitError),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    dir: String,
    name: String,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    keep: Option<usize>,

    /// 로그 파일에 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 DEBUG로 설정 된다.
    ///
    /// 이 값은 [`tracing::Level`]로 변환 됨으로 자세한 사항은 해당 파일을 확인
    level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    ///
    /// 이 값은 [`rolling::Rotation`]으로 변환 됨으로 자세한 사항은 해당 파일을 확인
    rotation: Option<String>,
}

impl Config {
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keep(&self) -> Option<usize> {
        self.keep
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn rotation(&self) -> Option<&str> {
        self.rotation.as_deref()
    }
}

/// 프로그램에서 사용할 로깅 옵션을 설정한다.
///
/// 설정이 있으면 JSON 형식으로 로그 파일에 기록하고, 없으면 WARN 이상만 stderr로 출력한다.
/// 메뉴가 stdout을 사용하므로 stdout에는 로그를 남기지 않는다.
/// 반환된 [`WorkerGuard`]가 drop 되면 남은 로그가 파일에 기록되지 않음으로 프로그램 종료시까지 유지해야 한다.
pub fn set_global_logging_config(c: Option<&Config>) -> Result<Option<WorkerGuard>, LoggingError> {
    let Some(c) = c else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
        return Ok(None);
    };

    let rotation = c.rotation.as_deref().map(parse_rotation).transpose()?
        .unwrap_or(rolling::Rotation::DAILY);
    let level = c.level.as_deref().map(parse_level).transpose()?
        .unwrap_or(tracing::Level::DEBUG);

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(c.name.clone())
        .filename_suffix("log")
        .rotation(rotation);

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    let file_appender = file_appender.build(&c.dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_writer(non_blocking)
        .with_max_level(level)
        .init();

    Ok(Some(guard))
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, LoggingError> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(LoggingError::UnknownRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, LoggingError> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(LoggingError::UnknownLevel(l.to_owned())),
    }
}

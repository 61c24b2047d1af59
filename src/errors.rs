use std::fmt;

#[derive(Debug, Clone)]
pub enum ExporterError {
    Bind(String),
    Registration(String),
    AlreadyRegistered(String),
    Encoding(String),
    Config(String),
}

impl ExporterError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ExporterError::Bind(_) => "E001",
            ExporterError::Registration(_) => "E002",
            ExporterError::AlreadyRegistered(_) => "E003",
            ExporterError::Encoding(_) => "E004",
            ExporterError::Config(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ExporterError::Bind(_) => "Bind Error",
            ExporterError::Registration(_) => "Metric Registration Error",
            ExporterError::AlreadyRegistered(_) => "Metrics Already Registered",
            ExporterError::Encoding(_) => "Exposition Encoding Error",
            ExporterError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ExporterError::Bind(msg) => msg,
            ExporterError::Registration(msg) => msg,
            ExporterError::AlreadyRegistered(msg) => msg,
            ExporterError::Encoding(msg) => msg,
            ExporterError::Config(msg) => msg,
        }
    }

    /// Whether the error happened while bringing the scrape endpoint up.
    ///
    /// Callers may choose to keep running without metrics export on these.
    pub fn is_init_error(&self) -> bool {
        matches!(
            self,
            ExporterError::Bind(_)
                | ExporterError::Registration(_)
                | ExporterError::AlreadyRegistered(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ExporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ExporterError {}

// 便捷的构造函数
impl ExporterError {
    pub fn bind<T: Into<String>>(msg: T) -> Self {
        ExporterError::Bind(msg.into())
    }

    pub fn registration<T: Into<String>>(msg: T) -> Self {
        ExporterError::Registration(msg.into())
    }

    pub fn already_registered<T: Into<String>>(msg: T) -> Self {
        ExporterError::AlreadyRegistered(msg.into())
    }

    pub fn encoding<T: Into<String>>(msg: T) -> Self {
        ExporterError::Encoding(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ExporterError::Config(msg.into())
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Bind(err.to_string())
    }
}

impl From<prometheus::Error> for ExporterError {
    fn from(err: prometheus::Error) -> Self {
        ExporterError::Registration(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ExporterError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ExporterError::Encoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectionAiError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("未设置 API 密钥。请使用 `inspect config --set-api-key YOUR_KEY` 设置，或设置环境变量 GEMINI_API_KEY")]
    MissingApiKey,

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("API 调用失败: {0}")]
    ApiCall(String),

    #[error("API 响应解析失败: {0}")]
    ApiParse(String),

    #[error("JSON 解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel 生成错误: {0}")]
    ExcelGeneration(String),

    #[error("交互输入错误: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] inspection_common::Error),
}

pub type Result<T> = std::result::Result<T, InspectionAiError>;

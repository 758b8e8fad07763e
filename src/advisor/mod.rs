//! AI整改建议モジュール
//!
//! 考评记录（確定前のスナップショットを含む）からプロンプトを組み立て、
//! 外部の文章生成サービスへ1回だけ問い合わせる。
//! 失敗はすべて固定の代替テキストに置き換え、呼び出し側へはエラーを返さない。
//! 考评记录ストアには一切触れないので、何度呼んでも、結果を捨てても安全。

mod gemini;

pub use gemini::{GeminiClient, GEMINI_API_BASE_URL};

use crate::error::Result;
use inspection_common::{
    build_advice_prompt, InspectionRecord, ADVICE_EMPTY_FALLBACK, ADVICE_ERROR_FALLBACK,
};
use tracing::{debug, warn};

/// 文章生成サービス
#[allow(async_fn_in_trait)]
pub trait AdvisoryClient {
    /// プロンプトを送信し、生成テキストを返す
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 整改建议を取得
///
/// - 応答テキストあり → そのまま返す
/// - 空の応答 → `ADVICE_EMPTY_FALLBACK`
/// - 通信・サービスエラー → `ADVICE_ERROR_FALLBACK`（warn ログのみ）
pub async fn request_advice<C: AdvisoryClient>(client: &C, record: &InspectionRecord) -> String {
    let prompt = build_advice_prompt(record);
    debug!(
        target_name = %record.target,
        items = record.items.len(),
        prompt_chars = prompt.chars().count(),
        "requesting inspection advice"
    );

    match client.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            debug!(response_chars = text.chars().count(), "advice received");
            text
        }
        Ok(_) => {
            warn!("advisory service returned an empty response");
            ADVICE_EMPTY_FALLBACK.to_string()
        }
        Err(e) => {
            warn!(error = %e, "advisory request failed");
            ADVICE_ERROR_FALLBACK.to_string()
        }
    }
}

/// クライアント生成から整改建议の取得までを行う
///
/// API密钥未設定などでクライアントを作れない場合も `ADVICE_ERROR_FALLBACK` を返す。
pub async fn request_advice_with<C: AdvisoryClient>(
    client: Result<C>,
    record: &InspectionRecord,
) -> String {
    match client {
        Ok(client) => request_advice(&client, record).await,
        Err(e) => {
            warn!(error = %e, "advisory client unavailable");
            ADVICE_ERROR_FALLBACK.to_string()
        }
    }
}

//! # カーソルトークンの符号化
//!
//! 並び順キーを JSON にシリアライズし base64（標準アルファベット）で包んだ
//! 不透明トークン。クライアントはトークンをそのまま次リクエストに渡すだけで、
//! 中身の形式には依存しない。
//!
//! 復号できないトークン（base64 でない、JSON でない、キー型が合わない）は
//! すべて [`CursorError::MalformedCursor`] に倒す。呼び出し側の入力エラーで
//! あり、リトライしても回復しない。

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Serialize, de::DeserializeOwned};

use crate::cursor::CursorError;

/// 並び順キーを不透明トークンに符号化する
pub fn encode_cursor<K: Serialize>(key: &K) -> Result<String, CursorError> {
    let json = serde_json::to_vec(key).map_err(|e| CursorError::TokenEncode {
        reason: format!("キーのシリアライズに失敗: {e}"),
    })?;
    Ok(BASE64.encode(json))
}

/// 不透明トークンを並び順キーに復号する
pub fn decode_cursor<K: DeserializeOwned>(token: &str) -> Result<K, CursorError> {
    let bytes = BASE64.decode(token).map_err(|e| CursorError::MalformedCursor {
        reason: format!("base64 の復号に失敗: {e}"),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| CursorError::MalformedCursor {
        reason: format!("キーの復元に失敗: {e}"),
    })
}

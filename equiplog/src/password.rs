//! エクスポート用パスワードのハッシュ化と検証
//!
//! bcryptは入力の先頭72バイトしか使わないため、それを超える入力は
//! ここで明示的に扱う。ハッシュ化は設定エラー、検証は不一致とする。

use crate::common::config::MAX_SECRET_BYTES;
use crate::common::error::{CommonError, EquipError, EquipResult};

/// bcryptのコスト
const HASH_COST: u32 = 12;

/// パスワードをbcryptでハッシュ化
///
/// `MAX_SECRET_BYTES` を超えるパスワードは `CommonError::Config` になる。
pub fn hash_password(password: &str) -> EquipResult<String> {
    if exceeds_limit(password) {
        return Err(CommonError::Config(format!(
            "Export password must be at most {} bytes",
            MAX_SECRET_BYTES
        ))
        .into());
    }
    bcrypt::hash(password, HASH_COST)
        .map_err(|e| EquipError::Internal(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// 長すぎる入力は照合せずに不一致として扱う（先頭72バイトが一致しても通さない）。
/// ハッシュ文字列が壊れている場合のみエラー。
pub fn verify_password(password: &str, hash: &str) -> EquipResult<bool> {
    if exceeds_limit(password) {
        return Ok(false);
    }
    bcrypt::verify(password, hash)
        .map_err(|e| EquipError::Internal(format!("Failed to verify password: {}", e)))
}

fn exceeds_limit(password: &str) -> bool {
    password.len() > MAX_SECRET_BYTES
}

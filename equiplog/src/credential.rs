//! エクスポート用資格情報
//!
//! 共有パスワードを1つだけ保持する。ファイルが存在しなければ初回アクセス時に
//! 設定された初期値で作成する。作成は一度きりで、既存のファイルを上書きしない。
//! 保存形式はbcryptハッシュ。旧形式の平文 (`{"password": "..."}`) は読み込めるが、
//! 検証に成功した時点でハッシュ形式に書き換える。

use crate::common::error::{CommonError, EquipError, EquipResult};
use crate::password::{hash_password, verify_password};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    /// 旧形式（平文）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

/// 読み込み済みの資格情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// bcryptハッシュ
    Hashed(String),
    /// 旧形式の平文パスワード
    Plain(String),
}

impl Credential {
    /// 入力されたパスワードと一致するか
    pub async fn matches(&self, supplied: &str) -> EquipResult<bool> {
        match self {
            Credential::Hashed(hash) => {
                let hash = hash.clone();
                let supplied = supplied.to_string();
                task::spawn_blocking(move || verify_password(&supplied, &hash))
                    .await
                    .map_err(|e| EquipError::Internal(format!("Failed to join verifier: {}", e)))?
            }
            Credential::Plain(password) => Ok(password == supplied),
        }
    }
}

/// 資格情報ストア
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    initial_secret: String,
}

impl CredentialStore {
    /// 保存先と初期パスワードを指定して作成
    pub fn new(path: impl Into<PathBuf>, initial_secret: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            initial_secret: initial_secret.into(),
        }
    }

    /// 保存先パス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 資格情報を読み込む。存在しなければ初期値で作成してから返す
    pub async fn load_or_init(&self) -> EquipResult<Credential> {
        match self.read().await? {
            Some(credential) => Ok(credential),
            None => self.initialize().await,
        }
    }

    /// パスワードを検証する。不一致でも資格情報は変更しない
    pub async fn verify(&self, supplied: &str) -> EquipResult<bool> {
        let credential = self.load_or_init().await?;
        let matched = credential.matches(supplied).await?;
        if matched {
            if let Credential::Plain(secret) = &credential {
                self.upgrade_legacy(secret).await;
            }
        }
        Ok(matched)
    }

    async fn read(&self) -> EquipResult<Option<Credential>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => self.parse(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EquipError::Storage(format!(
                "Failed to read credential {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse(&self, contents: &str) -> EquipResult<Credential> {
        let file: CredentialFile = serde_json::from_str(contents).map_err(|e| EquipError::Parse {
            unit: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        match (file.password_hash, file.password) {
            (Some(hash), _) => Ok(Credential::Hashed(hash)),
            (None, Some(password)) => Ok(Credential::Plain(password)),
            (None, None) => Err(EquipError::Parse {
                unit: self.path.display().to_string(),
                reason: "credential file has no password".to_string(),
            }),
        }
    }

    async fn initialize(&self) -> EquipResult<Credential> {
        let hash = hash_in_background(&self.initial_secret).await?;
        let body = encode(&hash)?;

        let path = self.path.clone();
        let published = task::spawn_blocking(move || publish(&path, &body, false))
            .await
            .map_err(|e| EquipError::Internal(format!("Failed to join writer: {}", e)))?;

        match published {
            Ok(()) => {
                info!(path = %self.path.display(), "Created export credential");
                Ok(Credential::Hashed(hash))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                // 同時に作成した別リクエストの資格情報を使う
                debug!(path = %self.path.display(), "Export credential created concurrently");
                self.read().await?.ok_or_else(|| {
                    EquipError::Storage(format!(
                        "Credential {} disappeared after creation",
                        self.path.display()
                    ))
                })
            }
            Err(e) => Err(write_error(&self.path, e)),
        }
    }

    /// 平文の資格情報をハッシュ形式に置き換える。失敗しても検証結果は変えない
    async fn upgrade_legacy(&self, secret: &str) {
        match self.rewrite_hashed(secret).await {
            Ok(()) => info!(path = %self.path.display(), "Upgraded legacy plaintext credential"),
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to upgrade legacy plaintext credential"
            ),
        }
    }

    async fn rewrite_hashed(&self, secret: &str) -> EquipResult<()> {
        let hash = hash_in_background(secret).await?;
        let body = encode(&hash)?;
        let path = self.path.clone();
        task::spawn_blocking(move || publish(&path, &body, true))
            .await
            .map_err(|e| EquipError::Internal(format!("Failed to join writer: {}", e)))?
            .map_err(|e| write_error(&self.path, e))
    }
}

async fn hash_in_background(secret: &str) -> EquipResult<String> {
    let secret = secret.to_string();
    task::spawn_blocking(move || hash_password(&secret))
        .await
        .map_err(|e| EquipError::Internal(format!("Failed to join hasher: {}", e)))?
}

fn encode(hash: &str) -> EquipResult<Vec<u8>> {
    let body = serde_json::to_vec_pretty(&CredentialFile {
        password_hash: Some(hash.to_string()),
        password: None,
    })
    .map_err(CommonError::from)?;
    Ok(body)
}

/// 同じディレクトリの一意な一時ファイルに書いてから公開する
///
/// `replace` が偽なら既存ファイルを上書きせず `AlreadyExists` を返す。
fn publish(path: &Path, body: &[u8], replace: bool) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;

    let persisted = if replace {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map(|_| ()).map_err(|e| e.error)
}

fn write_error(path: &Path, err: std::io::Error) -> EquipError {
    EquipError::Storage(format!(
        "Failed to write credential {}: {}",
        path.display(),
        err
    ))
}

/// 組み込みの初期パスワードを使う場合の警告
pub fn warn_default_secret() {
    warn!(
        "EQUIPLOG_EXPORT_PASSWORD is not set; the built-in default export password will be used \
         when the credential is first created"
    );
}

//! equiplog 共通ライブラリ
//!
//! サーバー・CLIで共有する型、リクエスト/レスポンス、エラー、設定

#![warn(missing_docs)]

/// 設定構造体
pub mod config;

/// エラー型
pub mod error;

/// HTTPリクエスト/レスポンス型
pub mod protocol;

/// コアデータ型
pub mod types;

//! rmedian の補助ツール群
//!
//! - `gen_testfile`: テスト用 CSV の生成
//! - `cross_validate`: 全バックエンドの結果の突き合わせ

pub mod common;
pub mod testdata;

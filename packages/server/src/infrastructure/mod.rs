//! Infrastructure layer
//!
//! Domain 層が定義する trait の具体的な実装と、外部とやり取りする DTO を提供します。

pub mod census_client;
pub mod dto;

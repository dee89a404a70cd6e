//! Employee (pegawai) profile

use serde::{Deserialize, Serialize};

/// Employee record returned by `GET /api/pegawai/{pin}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub pin: String,
    pub nama: String,
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(default)]
    pub jabatan: Option<String>,
    #[serde(default)]
    pub skpd: Option<String>,
    #[serde(default)]
    pub skpdid: Option<i64>,
}

//! Field-duty (tugas luar) types
//!
//! A field-duty submission exists in two places: as a locally staged
//! [`FieldDutyDraft`] that survives process death, and as a remote
//! [`FieldDuty`] once the server has accepted the upload.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local surrogate key of a staged draft (`idLocal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub i64);

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-duty submission composed by the user, not yet confirmed remotely.
///
/// `(destination, description, address)` identifies a draft: the store
/// rejects a second draft with the same triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDutyDraft {
    #[serde(rename = "tujuan")]
    pub destination: String,
    #[serde(rename = "keterangan_tugas")]
    pub description: String,
    #[serde(rename = "alamat")]
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

impl FieldDutyDraft {
    /// Scalar fields sent as multipart parts.
    pub fn form(&self) -> FieldDutyForm {
        FieldDutyForm {
            destination: self.destination.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
    }

    /// Local photo file referenced by the draft.
    pub fn photo_path(&self) -> PathBuf {
        PathBuf::from(&self.image_path)
    }

    /// `true` when both drafts share the uniqueness triple.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.destination == other.destination
            && self.description == other.description
            && self.address == other.address
    }
}

/// A draft together with its local surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFieldDuty {
    #[serde(rename = "idLocal")]
    pub id: DraftId,
    #[serde(flatten)]
    pub draft: FieldDutyDraft,
}

/// Scalar parts of a field-duty create/update upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDutyForm {
    pub destination: String,
    pub description: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
}

/// Field-duty entry as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDuty {
    pub id: i64,
    pub tujuan: String,
    pub keterangan_tugas: String,
    pub alamat: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

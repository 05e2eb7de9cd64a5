//! Common types used across the inventory ledger

use serde::{Deserialize, Serialize};

/// Names of the three independently persisted documents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    #[serde(rename = "stocks")]
    Stocks,
    #[serde(rename = "todaySales")]
    TodaySales,
    #[serde(rename = "products")]
    Products,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 3] = [
        SnapshotKey::Stocks,
        SnapshotKey::TodaySales,
        SnapshotKey::Products,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::Stocks => "stocks",
            SnapshotKey::TodaySales => "todaySales",
            SnapshotKey::Products => "products",
        }
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset cancellation reasons offered to the cashier; free text is also accepted
pub const CANCEL_REASONS: [&str; 5] = [
    "Salah Input Produk",
    "Pelanggan Batal Beli",
    "Ubah Pesanan",
    "Stok Tidak Cukup",
    "Pembayaran Gagal",
];

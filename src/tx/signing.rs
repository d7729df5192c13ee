//! Partial sign → witness merge → submit

use tracing::{debug, info};

use crate::error::WalletResult;
use crate::wallet::WalletSession;

/// Ask the wallet for a partial witness set and merge its vkey witnesses
/// into `tx`. Other witness kinds returned by the wallet are dropped.
pub async fn sign_transaction(session: &WalletSession, tx_hex: &str) -> WalletResult<String> {
    let witness_hex = session.sign_tx(tx_hex, true).await?;
    let engine = session.engine();

    let vkeys_only = engine.vkey_witnesses_only(&hex::decode(witness_hex)?)?;
    let signed = engine.assemble_transaction(&hex::decode(tx_hex)?, &vkeys_only)?;
    debug!(bytes = signed.len(), "witnesses merged");
    Ok(hex::encode(signed))
}

pub async fn submit_signed_transaction(session: &WalletSession, signed_tx_hex: &str) -> WalletResult<String> {
    let tx_id = session.submit_tx(signed_tx_hex).await?;
    info!(tx_id = %tx_id, "transaction submitted");
    Ok(tx_id)
}

/// Submission only happens once signing has fully succeeded.
pub async fn sign_and_submit_transaction(session: &WalletSession, tx_hex: &str) -> WalletResult<String> {
    let signed = sign_transaction(session, tx_hex).await?;
    submit_signed_transaction(session, &signed).await
}

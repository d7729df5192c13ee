//! TransactionBuilder - payment (+ optional fee split) funded from the session's UTxOs

use tracing::{debug, info, warn};

use crate::config::ProtocolParams;
use crate::core::{BuildTransactionInput, BuiltTransaction};
use crate::error::{WalletError, WalletResult};
use crate::ledger::CoinSelectionStrategy;
use crate::wallet::WalletSession;

/// Selection is left entirely to the engine's strategy 0.
const INPUT_SELECTION: CoinSelectionStrategy = CoinSelectionStrategy::LargestFirst;

#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    params: ProtocolParams,
}

impl TransactionBuilder {
    pub fn new(params: ProtocolParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Build an unsigned transaction. Any failure past the session check is
    /// reported as a single `TransactionBuild` error; nothing partial is returned.
    pub async fn build_transaction(
        &self,
        session: &WalletSession,
        input: &BuildTransactionInput,
    ) -> WalletResult<BuiltTransaction> {
        if !session.is_enabled() {
            return Err(WalletError::SessionNotEnabled);
        }
        match self.assemble(session, input).await {
            Ok(built) => {
                info!(tx_hash = %built.tx_hash, "transaction built");
                Ok(built)
            }
            Err(e) => {
                warn!(error = %e, "transaction build failed");
                Err(WalletError::build(e))
            }
        }
    }

    async fn assemble(&self, session: &WalletSession, input: &BuildTransactionInput) -> WalletResult<BuiltTransaction> {
        let mut builder = session.engine().new_tx_builder(&self.params)?;

        let payment = &input.payment.output;
        builder.add_output(&payment.address, payment.lovelace_amount)?;
        if let Some(fee) = &input.fee {
            builder.add_output(&fee.address, fee.lovelace_amount)?;
        }

        let raw_utxos = session.get_utxos(None, None).await?;
        let pool = raw_utxos.iter().map(hex::decode).collect::<Result<Vec<_>, _>>()?;
        debug!(inputs = pool.len(), "adding candidate inputs");
        builder.add_inputs_from(&pool, INPUT_SELECTION)?;

        let change_added = builder.add_change_if_needed(&input.payment.change_address)?;
        debug!(change_added, "change evaluated");

        let unsigned = builder.build()?;
        Ok(BuiltTransaction { tx_hash: hex::encode(unsigned.hash), tx: hex::encode(unsigned.bytes) })
    }
}

//! Gift-card workflow: an explicit stage machine over the session, so
//! out-of-order operations are unrepresentable instead of merely UI-gated.

use tracing::info;

use crate::error::{GiftCardError, Result};
use crate::params;
use crate::session::Session;
use crate::tx::{LockBuilder, RedeemBuilder};
use crate::types::{parse_ada, AppliedValidators, AssetName, TxHash, ValidatorBundle};

/// Workflow stage, carrying exactly the data later stages may use
#[derive(Clone)]
pub enum FlowStage {
    /// No session yet
    Disconnected,
    /// Provider connected and wallet bound
    SessionReady { session: Session },
    /// Contract artifacts derived for one (token name, UTXO) pair
    ParametersDerived {
        session: Session,
        applied: AppliedValidators,
    },
    /// Gift card minted, funds locked
    Locked {
        session: Session,
        applied: AppliedValidators,
        lock_tx: TxHash,
    },
    /// Gift card burned, funds redeemed
    Unlocked {
        session: Session,
        applied: AppliedValidators,
        lock_tx: TxHash,
        unlock_tx: TxHash,
    },
}

impl FlowStage {
    pub fn name(&self) -> &'static str {
        match self {
            FlowStage::Disconnected => "Disconnected",
            FlowStage::SessionReady { .. } => "SessionReady",
            FlowStage::ParametersDerived { .. } => "ParametersDerived",
            FlowStage::Locked { .. } => "Locked",
            FlowStage::Unlocked { .. } => "Unlocked",
        }
    }
}

/// Drives the fixed mint-then-burn sequence
#[derive(Clone)]
pub struct GiftCardFlow {
    stage: FlowStage,
}

impl Default for GiftCardFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GiftCardFlow {
    pub fn new() -> Self {
        Self {
            stage: FlowStage::Disconnected,
        }
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.stage {
            FlowStage::Disconnected => None,
            FlowStage::SessionReady { session }
            | FlowStage::ParametersDerived { session, .. }
            | FlowStage::Locked { session, .. }
            | FlowStage::Unlocked { session, .. } => Some(session),
        }
    }

    pub fn applied(&self) -> Option<&AppliedValidators> {
        match &self.stage {
            FlowStage::ParametersDerived { applied, .. }
            | FlowStage::Locked { applied, .. }
            | FlowStage::Unlocked { applied, .. } => Some(applied),
            _ => None,
        }
    }

    pub fn lock_tx(&self) -> Option<&TxHash> {
        match &self.stage {
            FlowStage::Locked { lock_tx, .. } | FlowStage::Unlocked { lock_tx, .. } => {
                Some(lock_tx)
            }
            _ => None,
        }
    }

    pub fn unlock_tx(&self) -> Option<&TxHash> {
        match &self.stage {
            FlowStage::Unlocked { unlock_tx, .. } => Some(unlock_tx),
            _ => None,
        }
    }

    fn out_of_turn(&self, expected: &'static str) -> GiftCardError {
        GiftCardError::OutOfTurn {
            expected,
            actual: self.stage.name(),
        }
    }

    /// Install a connected, wallet-bound session
    pub fn establish(&mut self, session: Session) -> Result<()> {
        if !matches!(self.stage, FlowStage::Disconnected) {
            return Err(self.out_of_turn("Disconnected"));
        }
        if !session.has_wallet() {
            return Err(GiftCardError::WalletNotBound);
        }
        self.stage = FlowStage::SessionReady { session };
        Ok(())
    }

    /// Derive contract artifacts from the token name and the first wallet
    /// UTXO. Permitted until a lock happens; deriving again replaces the
    /// previous artifacts.
    pub async fn derive_parameters(
        &mut self,
        token_name: &str,
        validators: &ValidatorBundle,
    ) -> Result<AppliedValidators> {
        let session = match &self.stage {
            FlowStage::SessionReady { session }
            | FlowStage::ParametersDerived { session, .. } => session.clone(),
            _ => return Err(self.out_of_turn("SessionReady")),
        };

        let name = AssetName::new(token_name)?;
        let utxo = session.first_wallet_utxo().await?;
        let applied = params::apply_params(&name, &utxo.out_ref, validators, &session)?;
        info!(policy = %applied.policy_id, "validators parameterized");

        self.stage = FlowStage::ParametersDerived {
            session,
            applied: applied.clone(),
        };
        Ok(applied)
    }

    /// Build, submit and confirm the lock (mint) transaction, then wait
    /// for the lock output to settle into the provider's UTXO view.
    ///
    /// On failure the stage is unchanged and the typed error tells the
    /// caller whether a retry is safe.
    pub async fn lock(&mut self, gift_ada: &str) -> Result<TxHash> {
        let (session, applied) = match &self.stage {
            FlowStage::ParametersDerived { session, applied } => {
                (session.clone(), applied.clone())
            }
            _ => return Err(self.out_of_turn("ParametersDerived")),
        };

        let lovelace = parse_ada(gift_ada)?;
        let input = session.first_wallet_utxo().await?;
        let plan = LockBuilder::new(&applied)
            .with_input(input)
            .with_amount(lovelace)
            .build_plan()?;

        let tx_hash = session.submit_plan(&plan).await?;
        session
            .wait_for_settlement(&applied.lock_address, &tx_hash)
            .await;
        info!(%tx_hash, "gift card locked");

        self.stage = FlowStage::Locked {
            session,
            applied,
            lock_tx: tx_hash.clone(),
        };
        Ok(tx_hash)
    }

    /// Build, submit and confirm the redeem (burn) transaction
    pub async fn redeem(&mut self) -> Result<TxHash> {
        let (session, applied, lock_tx) = match &self.stage {
            FlowStage::Locked {
                session,
                applied,
                lock_tx,
            } => (session.clone(), applied.clone(), lock_tx.clone()),
            _ => return Err(self.out_of_turn("Locked")),
        };

        let utxos = session.utxos_at(&applied.lock_address).await?;
        let plan = RedeemBuilder::new(&applied).with_inputs(utxos).build_plan()?;

        let tx_hash = session.submit_plan(&plan).await?;
        info!(%tx_hash, "gift card redeemed");

        self.stage = FlowStage::Unlocked {
            session,
            applied,
            lock_tx,
            unlock_tx: tx_hash.clone(),
        };
        Ok(tx_hash)
    }

    /// Drop everything and start over
    pub fn reset(&mut self) {
        self.stage = FlowStage::Disconnected;
    }
}

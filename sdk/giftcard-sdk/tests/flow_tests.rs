use giftcard_sdk::{FlowStage, GiftCardError, GiftCardFlow};

mod common;
use common::{
    derived_flow, ready_flow, ready_session, test_bundle, unbound_session, TestConnector,
    TestLedger,
};

#[tokio::test]
async fn connect_fails_observably_on_unreachable_provider() {
    let ledger = TestLedger::new();
    ledger.set_fail_health(true);

    let err = unbound_session(&ledger).await.unwrap_err();
    let err = err.downcast::<GiftCardError>().unwrap();
    assert!(matches!(err, GiftCardError::Provider(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn bind_fails_observably_on_refused_authorization() {
    let ledger = TestLedger::new();
    let session = unbound_session(&ledger).await.unwrap();

    let err = session
        .bind_wallet(&TestConnector::refusing(ledger.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, GiftCardError::WalletUnavailable(_)));
}

#[tokio::test]
async fn establish_requires_bound_wallet() {
    let ledger = TestLedger::new();
    let session = unbound_session(&ledger).await.unwrap();

    let mut flow = GiftCardFlow::new();
    let err = flow.establish(session).unwrap_err();
    assert!(matches!(err, GiftCardError::WalletNotBound));
    assert!(matches!(flow.stage(), FlowStage::Disconnected));
}

#[tokio::test]
async fn derive_requires_session() {
    let mut flow = GiftCardFlow::new();
    let err = flow
        .derive_parameters("GIFT", &test_bundle())
        .await
        .unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));
}

#[tokio::test]
async fn derive_rejects_empty_token_name() {
    let ledger = TestLedger::new();
    let mut flow = ready_flow(&ledger).await.unwrap();

    let err = flow.derive_parameters("", &test_bundle()).await.unwrap_err();
    assert!(matches!(err, GiftCardError::EmptyTokenName));
    assert!(flow.applied().is_none());
}

#[tokio::test]
async fn derive_distinguishes_empty_wallet_from_transport_failure() {
    let ledger = TestLedger::empty();
    let mut flow = ready_flow(&ledger).await.unwrap();

    let err = flow
        .derive_parameters("GIFT", &test_bundle())
        .await
        .unwrap_err();
    assert!(matches!(err, GiftCardError::NoSpendableInput(_)));
}

#[tokio::test]
async fn derive_may_be_repeated_until_locked() {
    let ledger = TestLedger::new();
    let mut flow = ready_flow(&ledger).await.unwrap();

    let first = flow
        .derive_parameters("GIFT", &test_bundle())
        .await
        .unwrap();
    let second = flow
        .derive_parameters("OTHER", &test_bundle())
        .await
        .unwrap();
    assert_ne!(first.policy_id, second.policy_id);
    assert!(matches!(flow.stage(), FlowStage::ParametersDerived { .. }));

    flow.lock("5").await.unwrap();
    let err = flow
        .derive_parameters("AGAIN", &test_bundle())
        .await
        .unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));
}

#[tokio::test]
async fn lock_requires_derived_parameters() {
    let ledger = TestLedger::new();
    let mut flow = ready_flow(&ledger).await.unwrap();

    let err = flow.lock("5").await.unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));
}

#[tokio::test]
async fn lock_rejects_non_numeric_amount() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();

    let err = flow.lock("not-a-number").await.unwrap_err();
    assert!(matches!(err, GiftCardError::InvalidAmount(_)));
    assert!(flow.lock_tx().is_none());
}

#[tokio::test]
async fn failed_submission_leaves_no_outcome_and_allows_retry() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();

    ledger.set_fail_submit(true);
    let err = flow.lock("5").await.unwrap_err();
    assert!(matches!(err, GiftCardError::Rejected(_)));
    assert!(!err.is_retryable());
    assert!(flow.lock_tx().is_none());
    assert!(matches!(flow.stage(), FlowStage::ParametersDerived { .. }));

    // The wallet UTXO was never consumed, so a second attempt goes through
    ledger.set_fail_submit(false);
    flow.lock("5").await.unwrap();
    assert!(flow.lock_tx().is_some());
}

#[tokio::test]
async fn lock_pays_the_gift_to_the_lock_address() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();
    let applied = flow.applied().unwrap().clone();

    let lock_tx = flow.lock("5").await.unwrap();

    let session = flow.session().unwrap().clone();
    let utxos = session.utxos_at(&applied.lock_address).await.unwrap();
    assert_eq!(utxos.len(), 1);
    assert_eq!(utxos[0].out_ref.tx_hash, lock_tx);
    assert_eq!(utxos[0].value.lovelace, 5_000_000);
}

#[tokio::test]
async fn redeem_requires_lock_outcome() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();

    let err = flow.redeem().await.unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));
    assert!(flow.unlock_tx().is_none());
}

#[tokio::test]
async fn lock_then_redeem_records_both_outcomes_once() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();
    let applied = flow.applied().unwrap().clone();

    let lock_tx = flow.lock("5").await.unwrap();
    assert!(matches!(flow.stage(), FlowStage::Locked { .. }));

    // A second lock is out of turn once an outcome exists
    let err = flow.lock("5").await.unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));

    let unlock_tx = flow.redeem().await.unwrap();
    assert!(matches!(flow.stage(), FlowStage::Unlocked { .. }));
    assert_ne!(lock_tx, unlock_tx);
    assert_eq!(flow.lock_tx(), Some(&lock_tx));
    assert_eq!(flow.unlock_tx(), Some(&unlock_tx));

    // The locked output was spent
    let session = flow.session().unwrap().clone();
    let utxos = session.utxos_at(&applied.lock_address).await.unwrap();
    assert!(utxos.is_empty());

    // No second redemption
    let err = flow.redeem().await.unwrap_err();
    assert!(matches!(err, GiftCardError::OutOfTurn { .. }));
}

#[tokio::test]
async fn failed_redeem_submission_keeps_the_lock_stage() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();
    flow.lock("5").await.unwrap();

    ledger.set_fail_submit(true);
    let err = flow.redeem().await.unwrap_err();
    assert!(matches!(err, GiftCardError::Rejected(_)));
    assert!(flow.unlock_tx().is_none());
    assert!(matches!(flow.stage(), FlowStage::Locked { .. }));

    ledger.set_fail_submit(false);
    flow.redeem().await.unwrap();
    assert!(flow.unlock_tx().is_some());
}

#[tokio::test]
async fn reset_returns_to_disconnected() {
    let ledger = TestLedger::new();
    let mut flow = derived_flow(&ledger).await.unwrap();

    flow.reset();
    assert!(matches!(flow.stage(), FlowStage::Disconnected));
    assert!(flow.session().is_none());

    let session = ready_session(&ledger).await.unwrap();
    flow.establish(session).unwrap();
    assert!(matches!(flow.stage(), FlowStage::SessionReady { .. }));
}

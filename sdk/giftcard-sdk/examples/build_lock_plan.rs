// Example: building the lock transaction plan offline
//
// This example demonstrates how to:
// 1. Construct applied-validator artifacts
// 2. Build the mint/lock plan with LockBuilder
// 3. Inspect the declarative plan before handing it to a backend

use giftcard_sdk::tx::LockBuilder;
use giftcard_sdk::types::{
    Address, AppliedValidators, AssetId, AssetName, OutputReference, PlutusScript, PolicyId,
    TxHash, Utxo, Value,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Artifacts as a script engine would derive them
    let policy_id = PolicyId("ab".repeat(28));
    let token_name = AssetName::new("GIFT")?;
    let applied = AppliedValidators {
        lock_address: Address("addr_test1demo0lock0address".to_string()),
        policy_id: policy_id.clone(),
        mint_script: PlutusScript::new("590a01"),
        spend_script: PlutusScript::new("590a02"),
        asset: AssetId::new(&policy_id, &token_name),
    };

    // 2. The wallet UTXO the validators were parameterized with
    let input = Utxo {
        out_ref: OutputReference {
            tx_hash: TxHash::new("11".repeat(32)),
            output_index: 0,
        },
        address: Address("addr_test1demo0wallet".to_string()),
        value: Value::lovelace(100_000_000),
    };

    // 3. Build and inspect the plan
    let plan = LockBuilder::new(&applied)
        .with_input(input)
        .with_amount(5_000_000)
        .build_plan()?;

    println!("Lock plan:");
    println!("{}", serde_json::to_string_pretty(&plan)?);
    println!("Net mint of {}: {}", applied.asset.as_str(), plan.minted_amount(&applied.asset));

    // In a real application:
    // let session = Session::builder()
    //     .with_provider(provider)
    //     .with_engine(engine)
    //     .with_assembler(assembler)
    //     .connect().await?;
    // let session = session.bind_wallet(&connector).await?;
    // let tx_hash = session.submit_plan(&plan).await?;

    Ok(())
}

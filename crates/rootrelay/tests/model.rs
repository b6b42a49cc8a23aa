//! Random administrative sequences against the relay.

use proptest::prelude::*;
use rootrelay::verify_chain;
use rootrelay_testkit::generators::{admin_op, AdminOp};
use rootrelay_testkit::RelayFixture;

fn run(ops: &[AdminOp]) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    runtime.block_on(async {
        let fixture = RelayFixture::new();

        for op in ops {
            let before = fixture.relay.snapshot().await;
            let dispatches_before = fixture.transport.dispatch_count();

            if let Err(err) = op.apply(&fixture).await {
                // A failed operation leaves no trace
                prop_assert_eq!(fixture.relay.snapshot().await, before, "{:?} -> {}", op, err);
                prop_assert_eq!(fixture.transport.dispatch_count(), dispatches_before);
            }

            let ownership = fixture.relay.ownership().await;
            prop_assert!(!ownership.owner().is_zero());
            prop_assert!(fixture.relay.budgets().await.first_zero().is_none());
        }

        let records = fixture.relay.audit_records().await;
        prop_assert!(verify_chain(&records).is_ok());
        Ok(())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_admin_sequences_keep_invariants(
        ops in prop::collection::vec(admin_op(), 1..40)
    ) {
        run(&ops)?;
    }

    #[test]
    fn test_renounce_never_succeeds(
        ops in prop::collection::vec(admin_op(), 0..20)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let fixture = RelayFixture::new();
            for op in &ops {
                let _ = op.apply(&fixture).await;
            }
            let owner = fixture.relay.owner().await;
            prop_assert!(fixture.relay.renounce_ownership(&owner).await.is_err());
            prop_assert_eq!(fixture.relay.owner().await, owner);
            Ok(())
        })?;
    }
}

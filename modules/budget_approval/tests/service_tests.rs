//! Integration tests for the budget approval service

mod common;

use budget_approval::contract::*;
use budget_approval::domain::workflow::submitted_prefix;
use budget_approval::domain::BudgetApprovalEvent;
use budget_approval::Config;
use common::{print_chain, print_test_header, TestEnv};
use hcm_core::SecurityContext;
use uuid::Uuid;

// ===== Plan lifecycle =====

#[tokio::test]
async fn test_create_plan_numbers_levels() {
    print_test_header(
        "test_create_plan_numbers_levels",
        &["A new plan is a draft whose levels are numbered 1..n and unsubmitted"],
    );

    let env = TestEnv::new();
    let approver = env.user();
    let created = env
        .service
        .create_plan(&env.creator, env.new_plan(&[Some(approver.user_id), None, None]))
        .await
        .unwrap();

    assert_eq!(created.plan.status, PlanStatus::Draft);
    assert_eq!(created.plan.created_by, env.creator.user_id);
    let orders: Vec<i32> = created.levels.iter().map(|l| l.level_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert!(created
        .levels
        .iter()
        .all(|l| l.status == LevelStatus::Pending && l.submitted_at.is_none()));
    assert_eq!(created.levels[0].approver_id, Some(approver.user_id));

    let listed = env.service.list_levels(&env.creator, created.plan.id).await.unwrap();
    assert_eq!(listed, created.levels);
}

#[tokio::test]
async fn test_create_plan_validation() {
    let env = TestEnv::with_config(Config {
        max_levels: 2,
        ..Config::default()
    });

    let err = env
        .service
        .create_plan(&env.creator, env.new_plan(&[]))
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Validation { .. }));

    let err = env
        .service
        .create_plan(&env.creator, env.new_plan(&[None, None, None]))
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Validation { .. }));

    assert!(env.service.list_plans(&env.creator).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_activates_first_level_only() {
    print_test_header(
        "test_submit_activates_first_level_only",
        &["Submitting moves the plan to pending and stamps level 1 only"],
    );

    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let submitted = env.submitted_plan(&[&a, &b]).await;
    print_chain("after submit", &submitted.levels);

    assert_eq!(submitted.plan.status, PlanStatus::Pending);
    assert!(submitted.levels[0].is_active());
    assert!(submitted.levels[1].submitted_at.is_none());

    let err = env
        .service
        .submit_plan(&env.creator, submitted.plan.id)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));
}

// ===== Approval chain =====

#[tokio::test]
async fn test_two_level_approval_scenario() {
    print_test_header(
        "test_two_level_approval_scenario",
        &[
            "Approving level 1 reveals level 2 and leaves the plan pending",
            "Approving level 2 approves the plan",
        ],
    );

    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;
    let (l1, l2) = (plan.levels[0].id, plan.levels[1].id);

    let after_first = env
        .service
        .approve_level(&a, l1, Some("looks fine".to_string()))
        .await
        .unwrap();
    print_chain("after level 1", &after_first.levels);

    assert_eq!(after_first.plan.status, PlanStatus::Pending);
    assert_eq!(after_first.levels[0].status, LevelStatus::Approved);
    assert!(after_first.levels[0].decided_at.is_some());
    assert_eq!(after_first.levels[0].comments.as_deref(), Some("looks fine"));
    assert!(after_first.levels[1].submitted_at.is_some());
    assert_eq!(after_first.levels[1].status, LevelStatus::Pending);

    let after_second = env.service.approve_level(&b, l2, None).await.unwrap();
    print_chain("after level 2", &after_second.levels);

    assert_eq!(after_second.plan.status, PlanStatus::Approved);
    assert_eq!(after_second.levels[1].status, LevelStatus::Approved);
    println!("✅ Plan approved after the last level");
}

#[tokio::test]
async fn test_rejection_scenario() {
    print_test_header(
        "test_rejection_scenario",
        &[
            "Rejecting level 2 of 3 rejects the plan",
            "Level 3 is never submitted",
        ],
    );

    let env = TestEnv::new();
    let (a, b, c) = (env.user(), env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b, &c]).await;

    env.service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap();
    let rejected = env
        .service
        .reject_level(&b, plan.levels[1].id, Some("budget too high".to_string()))
        .await
        .unwrap();
    print_chain("after rejection", &rejected.levels);

    assert_eq!(rejected.plan.status, PlanStatus::Rejected);
    assert_eq!(rejected.levels[1].status, LevelStatus::Rejected);
    assert_eq!(rejected.levels[1].comments.as_deref(), Some("budget too high"));
    assert!(rejected.levels[2].submitted_at.is_none());

    // Nothing can move the plan afterwards
    let err = env
        .service
        .approve_level(&c, plan.levels[2].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));
    assert!(env.store.chain(plan.plan.id)[2].submitted_at.is_none());
    assert!(env.service.pending_approvals(&c).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejection_requires_comment() {
    let env = TestEnv::new();
    let a = env.user();
    let plan = env.submitted_plan(&[&a]).await;

    for comments in [None, Some("   ".to_string())] {
        let err = env
            .service
            .reject_level(&a, plan.levels[0].id, comments)
            .await
            .unwrap_err();
        assert!(matches!(err, BudgetApprovalError::Validation { .. }));
    }

    let level = &env.store.chain(plan.plan.id)[0];
    assert!(level.is_active());
    assert_eq!(env.store.plan(plan.plan.id).map(|p| p.status), Some(PlanStatus::Pending));
}

#[tokio::test]
async fn test_rejection_comment_optional_when_configured() {
    let env = TestEnv::with_config(Config {
        require_rejection_comment: false,
        ..Config::default()
    });
    let a = env.user();
    let plan = env.submitted_plan(&[&a]).await;

    let rejected = env
        .service
        .reject_level(&a, plan.levels[0].id, None)
        .await
        .unwrap();
    assert_eq!(rejected.plan.status, PlanStatus::Rejected);
}

#[tokio::test]
async fn test_chain_is_always_a_submitted_prefix() {
    print_test_header(
        "test_chain_is_always_a_submitted_prefix",
        &["Submitted levels always form a prefix that grows by one per approval"],
    );

    let env = TestEnv::new();
    let approvers: Vec<SecurityContext> = (0..4).map(|_| env.user()).collect();
    let refs: Vec<&SecurityContext> = approvers.iter().collect();
    let plan = env.submitted_plan(&refs).await;

    for (i, approver) in approvers.iter().enumerate() {
        let chain = env.store.chain(plan.plan.id);
        assert_eq!(submitted_prefix(&chain), Some(i + 1));
        // Every earlier level is decided before the next is submitted
        assert!(chain[..i].iter().all(|l| l.status == LevelStatus::Approved));

        env.service
            .approve_level(approver, chain[i].id, None)
            .await
            .unwrap();
    }

    let chain = env.store.chain(plan.plan.id);
    assert_eq!(submitted_prefix(&chain), Some(4));
    assert_eq!(env.store.plan(plan.plan.id).map(|p| p.status), Some(PlanStatus::Approved));
}

#[tokio::test]
async fn test_skip_advances_chain() {
    print_test_header(
        "test_skip_advances_chain",
        &["The creator may skip the active level; it is recorded as skipped"],
    );

    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;

    let err = env
        .service
        .skip_level(&a, plan.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Forbidden { .. }));

    let skipped = env
        .service
        .skip_level(&env.creator, plan.levels[0].id, Some("manager on leave".to_string()))
        .await
        .unwrap();
    assert_eq!(skipped.levels[0].status, LevelStatus::Skipped);
    assert!(skipped.levels[0].decided_at.is_some());
    assert!(skipped.levels[1].is_active());
    assert_eq!(skipped.plan.status, PlanStatus::Pending);

    let finished = env
        .service
        .skip_level(&env.creator, plan.levels[1].id, None)
        .await
        .unwrap();
    assert_eq!(finished.plan.status, PlanStatus::Approved);
}

// ===== Guards =====

#[tokio::test]
async fn test_decided_level_cannot_be_decided_again() {
    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;

    env.service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap();

    let err = env
        .service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));

    let err = env
        .service
        .reject_level(&a, plan.levels[0].id, Some("changed my mind".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));
}

#[tokio::test]
async fn test_inactive_levels_cannot_be_decided() {
    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());

    let draft = env
        .service
        .create_plan(&env.creator, env.new_plan(&[Some(a.user_id), Some(b.user_id)]))
        .await
        .unwrap();
    let err = env
        .service
        .approve_level(&a, draft.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));

    let plan = env.submitted_plan(&[&a, &b]).await;
    let err = env
        .service
        .approve_level(&b, plan.levels[1].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Conflict { .. }));
}

#[tokio::test]
async fn test_only_assigned_approver_may_decide() {
    print_test_header(
        "test_only_assigned_approver_may_decide",
        &["Another user of the tenant gets Forbidden and nothing changes"],
    );

    let env = TestEnv::new();
    let (a, intruder) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a]).await;

    let err = env
        .service
        .approve_level(&intruder, plan.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Forbidden { .. }));

    let err = env
        .service
        .approve_level(&env.creator, plan.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Forbidden { .. }));

    assert!(env.store.chain(plan.plan.id)[0].is_active());
}

#[tokio::test]
async fn test_unassigned_level_policy() {
    let env = TestEnv::new();
    let created = env
        .service
        .create_plan(&env.creator, env.new_plan(&[None]))
        .await
        .unwrap();
    env.service
        .submit_plan(&env.creator, created.plan.id)
        .await
        .unwrap();

    let anyone = env.user();
    assert_eq!(env.service.pending_approvals(&anyone).await.unwrap().len(), 1);
    let approved = env
        .service
        .approve_level(&anyone, created.levels[0].id, None)
        .await
        .unwrap();
    assert_eq!(approved.plan.status, PlanStatus::Approved);

    let strict = TestEnv::with_config(Config {
        allow_unassigned_approver: false,
        ..Config::default()
    });
    let created = strict
        .service
        .create_plan(&strict.creator, strict.new_plan(&[None]))
        .await
        .unwrap();
    strict
        .service
        .submit_plan(&strict.creator, created.plan.id)
        .await
        .unwrap();

    let anyone = strict.user();
    assert!(strict.service.pending_approvals(&anyone).await.unwrap().is_empty());
    let err = strict
        .service
        .approve_level(&anyone, created.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::Forbidden { .. }));
}

#[tokio::test]
async fn test_other_tenant_sees_not_found() {
    let env = TestEnv::new();
    let a = env.user();
    let plan = env.submitted_plan(&[&a]).await;

    // Same user id, different tenant
    let foreign = SecurityContext::new(a.user_id, Uuid::new_v4());

    let err = env.service.get_plan(&foreign, plan.plan.id).await.unwrap_err();
    assert!(matches!(err, BudgetApprovalError::NotFound { .. }));
    let err = env.service.list_levels(&foreign, plan.plan.id).await.unwrap_err();
    assert!(matches!(err, BudgetApprovalError::NotFound { .. }));
    let err = env
        .service
        .approve_level(&foreign, plan.levels[0].id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetApprovalError::NotFound { .. }));

    assert!(env.service.pending_approvals(&foreign).await.unwrap().is_empty());
    assert!(env.service.list_plans(&foreign).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_storage_failure_leaves_chain_untouched() {
    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;
    let before = env.store.chain(plan.plan.id);

    env.store.fail_commits(true);
    let err = env
        .service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap_err();

    assert_eq!(err, BudgetApprovalError::Internal);
    assert_eq!(env.store.chain(plan.plan.id), before);
}

// ===== Pending approvals and events =====

#[tokio::test]
async fn test_pending_approvals_follow_the_chain() {
    print_test_header(
        "test_pending_approvals_follow_the_chain",
        &["Each approver sees a level only while it is the active one"],
    );

    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;

    let for_a = env.service.pending_approvals(&a).await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, plan.levels[0].id);
    assert!(env.service.pending_approvals(&b).await.unwrap().is_empty());

    env.service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap();

    assert!(env.service.pending_approvals(&a).await.unwrap().is_empty());
    let for_b = env.service.pending_approvals(&b).await.unwrap();
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].level_order, 2);
}

#[tokio::test]
async fn test_events_describe_the_chain() {
    let env = TestEnv::new();
    let (a, b) = (env.user(), env.user());
    let plan = env.submitted_plan(&[&a, &b]).await;

    env.service
        .approve_level(&a, plan.levels[0].id, None)
        .await
        .unwrap();
    env.service
        .approve_level(&b, plan.levels[1].id, None)
        .await
        .unwrap();

    let kinds: Vec<&str> = env
        .events
        .events()
        .iter()
        .map(|e| match e {
            BudgetApprovalEvent::PlanSubmitted(_) => "submitted",
            BudgetApprovalEvent::LevelDecided(_) => "decided",
            BudgetApprovalEvent::LevelActivated(_) => "activated",
            BudgetApprovalEvent::PlanFinalized(_) => "finalized",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["submitted", "activated", "decided", "activated", "decided", "finalized"]
    );
    assert!(env
        .events
        .events()
        .iter()
        .all(|e| e.plan_id() == plan.plan.id));
}

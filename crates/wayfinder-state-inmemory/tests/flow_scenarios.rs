//! End-to-end scenarios: the walker and projector running against a seeded
//! in-memory store.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;

use wayfinder_core::{
    project, AdvanceMode, CategoryRepository, CategoryService, CoreError, FlowOption,
    FlowRepository, FlowStep, NodePosition, OptionId, SelectionOutcome, StepId, TraversalWalker,
    WalkerStatus,
};
use wayfinder_state_inmemory::{InMemoryStore, NewOption, NewStep};

struct SeededFlow {
    store: InMemoryStore,
    steps: Vec<FlowStep>,
    options: Vec<FlowOption>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Seed a two-step laptop questionnaire: budget, then use case, with one
/// option per step.
async fn seed_laptop_flow() -> Result<SeededFlow> {
    init_tracing();
    let store = InMemoryStore::new();
    let category = store.create("Laptops", "laptop").await?;

    let mut steps = Vec::new();
    let mut options = Vec::new();

    for (title, option_title) in [("Budget", "Under $500"), ("Use case", "Gaming")] {
        let step = store
            .insert_step(NewStep {
                category_id: category.id.clone(),
                title: title.to_string(),
                description: Some(format!("Pick your {}", title.to_lowercase())),
                parent_option_id: None,
                is_conditional: false,
            })
            .await?;

        let option = store
            .insert_option(NewOption {
                step_id: step.id.clone(),
                title: option_title.to_string(),
                description: None,
            })
            .await?;

        steps.push(step);
        options.push(option);
    }

    Ok(SeededFlow {
        store,
        steps,
        options,
    })
}

#[tokio::test]
async fn test_linear_walk_through_seeded_flow() -> Result<()> {
    let seeded = seed_laptop_flow().await?;

    let mut walker = TraversalWalker::initialize(
        &seeded.store,
        &seeded.store,
        "laptop",
        AdvanceMode::Linear,
    )
    .await?;

    assert_eq!(walker.status(), WalkerStatus::AwaitingSelection);
    assert_eq!(walker.current_index(), 0);
    assert_eq!(walker.progress(), (1, 2));

    walker.load_current_options(&seeded.store).await?;
    assert_eq!(walker.options().len(), 1);
    assert_eq!(walker.options()[0].title, "Under $500");

    let first_option = walker.options()[0].id.clone();
    let outcome = walker.select_option(first_option.clone());
    assert_eq!(outcome, SelectionOutcome::Advanced { next_index: 1 });

    // The previous step's options were cleared and must be reloaded.
    assert!(walker.options().is_empty());
    walker.load_current_options(&seeded.store).await?;
    assert_eq!(walker.options()[0].title, "Gaming");

    let second_option = walker.options()[0].id.clone();
    let outcome = walker.select_option(second_option.clone());

    let expected: HashMap<_, _> = [
        (seeded.steps[0].id.clone(), first_option),
        (seeded.steps[1].id.clone(), second_option),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        outcome,
        SelectionOutcome::Completed {
            selections: expected
        }
    );
    assert_eq!(walker.status(), WalkerStatus::Completed);

    Ok(())
}

#[tokio::test]
async fn test_initialize_unknown_slug() -> Result<()> {
    let seeded = seed_laptop_flow().await?;

    let result = TraversalWalker::initialize(
        &seeded.store,
        &seeded.store,
        "camera",
        AdvanceMode::Linear,
    )
    .await;

    assert!(matches!(result, Err(CoreError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_empty_category_is_a_valid_session() -> Result<()> {
    let store = InMemoryStore::new();
    store.create("Televisions", "tv").await?;

    let mut walker =
        TraversalWalker::initialize(&store, &store, "tv", AdvanceMode::Linear).await?;

    assert_eq!(walker.status(), WalkerStatus::AwaitingSelection);
    assert!(walker.steps().is_empty());

    // Loading options and selecting are both safe no-ops.
    walker.load_current_options(&store).await?;
    let outcome = walker.select_option(OptionId("optA".to_string()));
    assert_eq!(outcome, SelectionOutcome::Ignored);
    assert_eq!(walker.current_index(), 0);

    Ok(())
}

#[tokio::test]
async fn test_condition_following_walk() -> Result<()> {
    let store = InMemoryStore::new();
    let category = store.create("Laptops", "laptop").await?;

    let mut steps = Vec::new();
    for title in ["Budget", "Use case", "Brand"] {
        steps.push(
            store
                .insert_step(NewStep {
                    category_id: category.id.clone(),
                    title: title.to_string(),
                    description: None,
                    parent_option_id: None,
                    is_conditional: false,
                })
                .await?,
        );
    }

    let skip_option = store
        .insert_option(NewOption {
            step_id: steps[0].id.clone(),
            title: "I already know my budget".to_string(),
            description: None,
        })
        .await?;

    // Authored branch: the first option jumps straight to the third step.
    store
        .insert_condition(skip_option.id.clone(), steps[2].id.clone())
        .await?;

    let mut walker = TraversalWalker::initialize(
        &store,
        &store,
        "laptop",
        AdvanceMode::FollowConditions,
    )
    .await?;

    let outcome = walker.select_option(skip_option.id.clone());
    assert_eq!(outcome, SelectionOutcome::Advanced { next_index: 2 });
    assert_eq!(walker.current_step().unwrap().id, steps[2].id);

    // The same selection under the linear default advances by one.
    let mut linear_walker =
        TraversalWalker::initialize(&store, &store, "laptop", AdvanceMode::Linear).await?;
    let outcome = linear_walker.select_option(skip_option.id);
    assert_eq!(outcome, SelectionOutcome::Advanced { next_index: 1 });

    Ok(())
}

#[tokio::test]
async fn test_projection_of_seeded_flow() -> Result<()> {
    let seeded = seed_laptop_flow().await?;
    let store = &seeded.store;

    store
        .insert_condition(seeded.options[0].id.clone(), seeded.steps[1].id.clone())
        .await?;

    let mut options_by_step: HashMap<StepId, Vec<FlowOption>> = HashMap::new();
    for step in &seeded.steps {
        options_by_step.insert(step.id.clone(), store.list_options(&step.id).await?);
    }
    let conditions = store.list_conditions().await?;

    let graph = project(&seeded.steps, &options_by_step, &conditions);

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.nodes[0].position, NodePosition { x: 0.0, y: 0.0 });
    assert_eq!(graph.nodes[1].position, NodePosition { x: 300.0, y: 0.0 });
    assert_eq!(graph.edges[0].source, seeded.options[0].id);
    assert_eq!(graph.edges[0].target, seeded.steps[1].id);

    // Re-projecting the same store contents yields the same graph.
    let again = project(&seeded.steps, &options_by_step, &conditions);
    assert_eq!(graph, again);

    // A locally drawn connection lands in the edge set without touching
    // the store.
    let mut edited = graph.clone();
    edited.connect(seeded.options[1].id.clone(), seeded.steps[0].id.clone());
    assert_eq!(edited.edges.len(), 2);
    assert_eq!(store.list_conditions().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_category_service_over_store() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let service = CategoryService::new(store.clone());

    let created = service.create("Laptops", "laptop").await?;
    assert_eq!(created.slug, "laptop");

    let listed = service.list().await?;
    assert_eq!(listed, vec![created]);

    let duplicate = service.create("Notebooks", "laptop").await;
    assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

    Ok(())
}

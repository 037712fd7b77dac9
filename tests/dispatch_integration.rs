//! End-to-end dispatch flows: registration through a registry, resolution
//! and invocation through a dispatcher.

use courier_core::component::Component;
use courier_core::error::DispatchError;
use courier_core::events::EventPublisher;
use courier_core::handler::{CandidateMethod, DispatchMode, HandlerDescriptor};
use courier_core::messaging::{Envelope, EnvelopeMetadata};
use courier_core::registry::{HandlerRegistry, WILDCARD};
use courier_core::test_helpers::{
    EchoHandler, FailingHandler, RecordingHandler, RespondingHandler,
};
use courier_core::Dispatcher;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn synchronous_dispatch_returns_the_handler_result_envelope() {
    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::QueryView,
            "RecipesQueryView",
            vec![CandidateMethod::synchronous(
                "shop.findRecipe",
                "findRecipe",
                Arc::new(EchoHandler::new()),
            )],
        ))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let envelope = Envelope::new("shop.findRecipe", json!({"recipeId": "1234"}));
    let result = dispatcher.synchronous_dispatch(&envelope).await.unwrap();

    // Exactly the envelope the handler returned.
    assert_eq!(result, envelope);

    // The same name is not bound asynchronously.
    let err = dispatcher
        .asynchronous_dispatch(&envelope)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::MissingHandler { .. }));
}

#[tokio::test]
async fn synchronous_response_carries_identifiers_and_causation() {
    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::QueryView,
            "RecipesQueryView",
            vec![CandidateMethod::synchronous(
                "shop.findRecipe",
                "findRecipe",
                Arc::new(RespondingHandler::new("shop.recipeFound")),
            )],
        ))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let mut metadata = EnvelopeMetadata::new("shop.findRecipe");
    metadata.correlation_id = Some("client-42".to_string());
    let request = Envelope::with_metadata(metadata, json!({"recipeId": "1234"}));

    let response = dispatcher.synchronous_dispatch(&request).await.unwrap();

    assert_eq!(response.name(), "shop.recipeFound");
    assert_eq!(response.metadata.correlation_id.as_deref(), Some("client-42"));
    assert_eq!(response.metadata.causation, vec![request.id()]);
}

#[tokio::test]
async fn named_binding_shadows_the_wildcard_binding() {
    let wildcard_handler = Arc::new(RecordingHandler::new());
    let named_handler = Arc::new(RecordingHandler::new());

    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::EventListener,
            "AllEventsListener",
            vec![CandidateMethod::asynchronous(
                WILDCARD,
                "handle",
                wildcard_handler.clone(),
            )],
        ))
        .unwrap();
    registry
        .register(&HandlerDescriptor::new(
            Component::EventListener,
            "RecipeAddedListener",
            vec![CandidateMethod::asynchronous(
                "shop.create",
                "recipeAdded",
                named_handler.clone(),
            )],
        ))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let envelope = Envelope::new("shop.create", json!({}));
    dispatcher.asynchronous_dispatch(&envelope).await.unwrap();

    // Only the named handler's side effect is recorded.
    assert_eq!(named_handler.recorded(), vec![envelope]);
    assert!(wildcard_handler.recorded().is_empty());

    // A name with no exact binding still reaches the wildcard.
    let other = Envelope::new("shop.delete", json!({}));
    dispatcher.asynchronous_dispatch(&other).await.unwrap();
    assert_eq!(wildcard_handler.recorded(), vec![other]);
}

#[tokio::test]
async fn duplicate_registration_fails_and_leaves_first_binding_resolvable() {
    let first = Arc::new(RecordingHandler::new());

    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::CommandHandler,
            "RecipeCommandHandler",
            vec![CandidateMethod::asynchronous(
                "shop.create",
                "create",
                first.clone(),
            )],
        ))
        .unwrap();

    let err = registry
        .register(&HandlerDescriptor::new(
            Component::CommandHandler,
            "RecipeCommandHandlerDuplicate",
            vec![CandidateMethod::asynchronous(
                "shop.create",
                "create",
                Arc::new(RecordingHandler::new()),
            )],
        ))
        .unwrap_err();
    match &err {
        DispatchError::DuplicateHandler { name, mode } => {
            assert_eq!(name, "shop.create");
            assert_eq!(*mode, DispatchMode::Asynchronous);
        }
        other => panic!("expected DuplicateHandler, got {other:?}"),
    }

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let envelope = Envelope::new("shop.create", json!({}));
    dispatcher.asynchronous_dispatch(&envelope).await.unwrap();
    assert_eq!(first.recorded(), vec![envelope]);
}

#[tokio::test]
async fn handler_failure_is_distinguishable_from_routing_failure() {
    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::CommandHandler,
            "RecipeCommandHandler",
            vec![CandidateMethod::asynchronous(
                "shop.create",
                "create",
                Arc::new(FailingHandler::new("no cakes left")),
            )],
        ))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let envelope = Envelope::new("shop.create", json!({}));
    let err = dispatcher.asynchronous_dispatch(&envelope).await.unwrap_err();

    match &err {
        DispatchError::HandlerExecution { envelope_id, .. } => {
            assert_eq!(*envelope_id, envelope.id());
        }
        other => panic!("expected HandlerExecution, got {other:?}"),
    }
    let source = std::error::Error::source(&err).expect("original cause attached");
    assert_eq!(source.to_string(), "no cakes left");
}

#[tokio::test]
async fn one_descriptor_may_bind_several_names() {
    let create_handler = Arc::new(RecordingHandler::new());

    let mut registry = HandlerRegistry::new();
    registry
        .register(&HandlerDescriptor::new(
            Component::CommandHandler,
            "RecipeCommandHandler",
            vec![
                CandidateMethod::asynchronous("shop.create", "create", create_handler.clone()),
                CandidateMethod::synchronous(
                    "shop.findRecipe",
                    "findRecipe",
                    Arc::new(EchoHandler::new()),
                ),
            ],
        ))
        .unwrap();

    let stats = registry.stats();
    assert_eq!(stats.total_bindings, 2);
    assert_eq!(stats.synchronous_bindings, 1);
    assert_eq!(stats.asynchronous_bindings, 1);

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let command = Envelope::new("shop.create", json!({}));
    dispatcher.asynchronous_dispatch(&command).await.unwrap();
    assert_eq!(create_handler.recorded(), vec![command]);

    let query = Envelope::new("shop.findRecipe", json!({}));
    let result = dispatcher.synchronous_dispatch(&query).await.unwrap();
    assert_eq!(result, query);
}

#[tokio::test]
async fn registration_emits_one_lifecycle_event_per_binding() {
    let publisher = EventPublisher::new(16);
    let mut receiver = publisher.subscribe();

    let mut registry = HandlerRegistry::with_event_publisher(publisher);
    registry
        .register(&HandlerDescriptor::new(
            Component::CommandHandler,
            "RecipeCommandHandler",
            vec![
                CandidateMethod::asynchronous(
                    "shop.create",
                    "create",
                    Arc::new(RecordingHandler::new()),
                ),
                CandidateMethod::asynchronous(
                    "shop.delete",
                    "delete",
                    Arc::new(RecordingHandler::new()),
                ),
            ],
        ))
        .unwrap();

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.name, "handler.registered");
    assert_eq!(first.context["name"], "shop.create");

    let second = receiver.recv().await.unwrap();
    assert_eq!(second.context["name"], "shop.delete");
}

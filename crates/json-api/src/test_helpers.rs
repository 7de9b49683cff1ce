//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use barrique_app::{
    context::AppContext,
    domain::{
        catalogue::MockCatalogueService, events::MockEventsService, orders::MockOrdersService,
        promos::MockPromoCodesService,
    },
};

use crate::state::State;

fn strict_catalogue_mock() -> MockCatalogueService {
    let mut catalogue = MockCatalogueService::new();

    catalogue.expect_get_catalogue().never();

    catalogue
}

fn strict_events_mock() -> MockEventsService {
    let mut events = MockEventsService::new();

    events.expect_get_event().never();
    events.expect_create_event().never();

    events
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_submit_order().never();
    orders.expect_set_status().never();
    orders.expect_get_order().never();

    orders
}

fn strict_promos_mock() -> MockPromoCodesService {
    let mut promos = MockPromoCodesService::new();

    promos.expect_validate_code().never();
    promos.expect_create_code().never();
    promos.expect_deactivate_code().never();
    promos.expect_list_codes().never();

    promos
}

pub(crate) fn state_with_catalogue(catalogue: MockCatalogueService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalogue: Arc::new(catalogue),
        events: Arc::new(strict_events_mock()),
        orders: Arc::new(strict_orders_mock()),
        promos: Arc::new(strict_promos_mock()),
    }))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalogue: Arc::new(strict_catalogue_mock()),
        events: Arc::new(strict_events_mock()),
        orders: Arc::new(orders),
        promos: Arc::new(strict_promos_mock()),
    }))
}

pub(crate) fn state_with_promos(promos: MockPromoCodesService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalogue: Arc::new(strict_catalogue_mock()),
        events: Arc::new(strict_events_mock()),
        orders: Arc::new(strict_orders_mock()),
        promos: Arc::new(promos),
    }))
}

pub(crate) fn service_with(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

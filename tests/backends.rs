//! Integration tests for the property backends behind the trait seam.
//!
//! Every backend is exercised through `PropertyBackend` only, the way the
//! dispatch loop sees it.

use thermoprop_mcp::thermo::{
    build_backend, BackendError, BackendKind, Phase, Property, PropertyBackend, PropertyValue,
    StatePoint, SEARCH_LIMIT,
};

const ALL_KINDS: [BackendKind; 3] = [
    BackendKind::Mock,
    BackendKind::Correlation,
    BackendKind::Phase,
];

fn backend(kind: BackendKind) -> Box<dyn PropertyBackend> {
    build_backend(kind, 8, None).unwrap()
}

fn room() -> StatePoint {
    StatePoint::new(298.15, 101_325.0).unwrap()
}

fn number(backend: &mut dyn PropertyBackend, component: &str, property: Property, state: StatePoint) -> f64 {
    let handle = backend.resolve(component, state).unwrap();
    match backend.property(&handle, property).unwrap() {
        PropertyValue::Number(value) => value,
        other => panic!("expected a number for {component} {property}, got {other:?}"),
    }
}

// =============================================================================
// Shared Contract
// =============================================================================

#[test]
fn every_backend_lists_and_searches() {
    for kind in ALL_KINDS {
        let backend = backend(kind);
        assert_eq!(backend.name(), kind.to_string());

        let components = backend.components();
        assert!(!components.is_empty(), "{kind} lists nothing");

        // Each listed component finds itself.
        for name in &components {
            let hits = backend.search(name);
            assert!(
                hits.iter().any(|h| &h.name == name),
                "{kind}: search for {name} missed it"
            );
        }

        assert!(!backend.properties().is_empty());
    }
}

#[test]
fn search_never_exceeds_limit() {
    for kind in ALL_KINDS {
        let backend = backend(kind);
        for query in ["a", "e", "o", "1", "c"] {
            assert!(backend.search(query).len() <= SEARCH_LIMIT, "{kind} / {query}");
        }
        assert!(backend.search("").is_empty());
    }
}

#[test]
fn unknown_component_is_not_found_everywhere() {
    for kind in ALL_KINDS {
        let mut backend = backend(kind);
        let err = backend.resolve("unobtainium", room()).unwrap_err();
        assert!(
            matches!(err, BackendError::ComponentNotFound { .. }),
            "{kind}: {err}"
        );
        assert!(err.to_string().contains("unobtainium"));
    }
}

#[test]
fn resolution_is_cached_per_state_point() {
    let mut backend = backend(BackendKind::Correlation);
    let hot = StatePoint::new(350.0, 101_325.0).unwrap();

    let first = backend.resolve("Water", room()).unwrap();
    let again = backend.resolve("water ", room()).unwrap();
    assert_eq!(first.key, again.key);
    backend.resolve("water", hot).unwrap();

    let stats = backend.cache_stats().unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.capacity, 8);
}

#[test]
fn failed_resolutions_are_not_cached() {
    let mut backend = backend(BackendKind::Mock);
    assert!(backend.resolve("unobtainium", room()).is_err());
    assert!(backend.resolve("unobtainium", room()).is_err());
    let stats = backend.cache_stats().unwrap();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 0);
}

#[test]
fn zero_capacity_disables_caching() {
    let mut backend = build_backend(BackendKind::Phase, 0, None).unwrap();
    backend.resolve("quartz", room()).unwrap();
    backend.resolve("quartz", room()).unwrap();
    let stats = backend.cache_stats().unwrap();
    assert_eq!((stats.hits, stats.misses, stats.entries), (0, 2, 0));
}

// =============================================================================
// Correlation Backend
// =============================================================================

#[test]
fn correlation_water_reference_points() {
    let mut backend = backend(BackendKind::Correlation);

    let rho = number(backend.as_mut(), "water", Property::Density, room());
    assert!((rho - 997.0).abs() / 997.0 < 0.01, "density {rho}");

    let boiling = StatePoint::new(373.15, 101_325.0).unwrap();
    let psat = number(backend.as_mut(), "water", Property::VaporPressure, boiling);
    assert!((psat - 101_325.0).abs() / 101_325.0 < 0.01, "psat {psat}");

    let tc = number(backend.as_mut(), "H2O", Property::CriticalTemperature, room());
    assert!((tc - 647.1).abs() < 0.5);
}

#[test]
fn correlation_phases_at_room_conditions() {
    let mut backend = backend(BackendKind::Correlation);
    for (component, expected) in [
        ("water", Phase::Liquid),
        ("ethanol", Phase::Liquid),
        ("nitrogen", Phase::Gas),
        ("methane", Phase::Gas),
    ] {
        let handle = backend.resolve(component, room()).unwrap();
        assert_eq!(
            backend.property(&handle, Property::Phase).unwrap(),
            PropertyValue::Phase(expected),
            "{component}"
        );
    }
}

#[test]
fn correlation_provenance_names_a_method() {
    let mut backend = backend(BackendKind::Correlation);
    let handle = backend.resolve("benzene", room()).unwrap();
    for property in [Property::Density, Property::VaporPressure, Property::HeatCapacity] {
        let provenance = backend.describe(&handle, property);
        assert!(provenance.method.is_some(), "{property}");
        assert!(!provenance.references.is_empty(), "{property}");
    }
}

// =============================================================================
// Phase Backend
// =============================================================================

#[test]
fn phase_backend_reference_points() {
    let mut backend = backend(BackendKind::Phase);

    let rho = number(backend.as_mut(), "quartz", Property::Density, room());
    assert!((rho - 2648.0).abs() < 5.0, "density {rho}");

    let warm = StatePoint::new(600.0, 1e5).unwrap();
    let s_room = number(backend.as_mut(), "quartz", Property::Entropy, room());
    let s_warm = number(backend.as_mut(), "quartz", Property::Entropy, warm);
    assert!(s_warm > s_room);

    let handle = backend.resolve("SiO2", room()).unwrap();
    assert_eq!(handle.identity.name, "Quartz");
    assert_eq!(
        backend.property(&handle, Property::Phase).unwrap(),
        PropertyValue::Phase(Phase::Solid)
    );
}

#[test]
fn phase_backend_gibbs_is_h_minus_ts() {
    let mut backend = backend(BackendKind::Phase);
    let state = StatePoint::new(500.0, 1e5).unwrap();
    let h = number(backend.as_mut(), "periclase", Property::Enthalpy, state);
    let s = number(backend.as_mut(), "periclase", Property::Entropy, state);
    let g = number(backend.as_mut(), "periclase", Property::GibbsEnergy, state);
    assert!((g - (h - 500.0 * s)).abs() < 1e-6 * h.abs().max(1.0));
}

// Tests for the characteristic-root solver

use recurtty::parser::parse_recurrence;
use recurtty::solver::{
    find_root, find_root_with, solve_recurrence, solve_recurrence_with, Root, RootFinder,
    SolveEvent, SolveTrace,
};

fn solve(text: &str) -> Root {
    solve_recurrence(&parse_recurrence(text).expect("Parsing failed")).expect("Solving failed")
}

fn root_of(deltas: &[f64]) -> f64 {
    find_root(deltas, None)
        .value()
        .unwrap_or_else(|| panic!("no root for {:?}", deltas))
}

#[test]
fn test_closed_forms() {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    assert!((root_of(&[1.0, 2.0]) - phi).abs() < 1e-9);
    assert_eq!(find_root(&[1.0, 1.0], None), Root::Finite(2.0));
    assert!((root_of(&[1.0, 2.0, 3.0]) - 1.839_286_755_214_161_2).abs() < 1e-9);
    assert_eq!(find_root(&[1.0, 1.0, 1.0, 1.0, 1.0], None), Root::Finite(5.0));
}

#[test]
fn test_sentinels() {
    assert_eq!(find_root(&[], None), Root::Divergent);
    assert_eq!(find_root(&[], None).to_sentinel(), f64::INFINITY);
    assert_eq!(find_root(&[0.0, 1.0], None), Root::Infeasible);
    assert_eq!(find_root(&[-1.0, 1.0], None), Root::Infeasible);
    assert_eq!(find_root(&[-1.0, 1.0], None).to_sentinel(), 1e6);
    assert_eq!(solve("T(n) = 0.5*T(n-1)"), Root::Infeasible);
}

#[test]
fn test_single_delta_is_one() {
    for d in [1.0, 7.5, 0.0, -2.0, 1e-9] {
        assert_eq!(find_root(&[d], None), Root::Finite(1.0));
    }
}

#[test]
fn test_both_forms_agree_on_unit_coefficients() {
    let cases: [(&str, &[f64]); 4] = [
        ("T(n) = T(n-1) + T(n-2)", &[1.0, 2.0]),
        ("T(n) = T(n-1) + T(n-2) + T(n-3)", &[1.0, 2.0, 3.0]),
        ("T(n) = T(n-1.5) + T(n-2.25)", &[1.5, 2.25]),
        ("T(n) = T(n-3) + T(n-3) + T(n-3)", &[3.0, 3.0, 3.0]),
    ];
    for (text, deltas) in cases {
        let specialized = solve(text).value().unwrap();
        let generalized = root_of(deltas);
        assert!(
            (specialized - generalized).abs() < 1e-6,
            "{}: {} vs {}",
            text,
            specialized,
            generalized
        );
    }
}

#[test]
fn test_monotone_in_coefficients() {
    let mut previous = 1.0;
    for c in [1.0, 1.5, 2.0, 3.0, 10.0, 100.0] {
        let r = solve(&format!("T(n) = {}*T(n-1) + T(n-2)", c)).value().unwrap();
        assert!(r >= previous, "coefficient {} gave {} < {}", c, r, previous);
        previous = r;
    }
}

#[test]
fn test_monotone_in_deltas() {
    let mut previous = f64::INFINITY;
    for d in [1.0, 1.5, 2.0, 3.0, 5.0, 20.0] {
        let r = root_of(&[1.0, d]);
        assert!(r <= previous, "delta {} gave {} > {}", d, r, previous);
        previous = r;
    }
}

#[test]
fn test_extreme_deltas() {
    // tiny deltas push the root past the bracket cap
    assert_eq!(find_root(&[1e-6, 1e-6], None), Root::Infeasible);

    // huge deltas keep the root just above one
    let r = root_of(&[500.0, 800.0, 1000.0]);
    assert!(r > 1.0 && r < 1.01);
}

#[test]
fn test_warm_start_agrees_with_cold_start() {
    let deltas = [1.25, 2.0, 3.5, 3.5];
    let cold = root_of(&deltas);
    for hint in [0.5, 1.0, cold * 0.9, cold, cold * 1.1, 3.0, 1e9, f64::NAN] {
        let warm = find_root(&deltas, Some(hint)).value().unwrap();
        assert!((warm - cold).abs() < 1e-6, "hint {}: {} vs {}", hint, warm, cold);
    }
}

#[test]
fn test_root_finder_over_perturbed_weights() {
    let branches = [[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let mut finder = RootFinder::new();

    for step in 0..20 {
        let w = [1.0 + step as f64 * 0.01, 2.0 - step as f64 * 0.01];
        let deltas: Vec<f64> = branches
            .iter()
            .map(|b| b[0] * w[0] + b[1] * w[1])
            .collect();

        let cached = finder.find_root("branching", &deltas).value().unwrap();
        let cold = root_of(&deltas);
        assert!((cached - cold).abs() < 1e-6);
    }

    let stats = finder.stats();
    assert_eq!(stats.calls, 20);
    assert!(stats.newton_hits > 0);
    assert_eq!(stats.infeasible, 0);
}

#[test]
fn test_trace_records_the_search() {
    let mut trace = SolveTrace::new();
    let root = find_root_with(&[1.0, 2.0], None, &mut trace);

    assert!(matches!(trace.events()[0], SolveEvent::Probe { .. }));
    let (lower, upper) = trace.bracket().unwrap();
    assert_eq!(lower, 1.0);
    assert!(upper >= 2.0);
    assert!(trace.iterations() > 0);
    assert_eq!(trace.outcome(), Some(root));

    let mut trace = SolveTrace::new();
    let rec = parse_recurrence("T(n) = 3*T(n-1)").unwrap();
    solve_recurrence_with(&rec, &mut trace).unwrap();
    assert_eq!(trace.bracket(), Some((1.0, 4.0)));
    assert_eq!(trace.outcome(), Some(Root::Finite(3.0)));
    // probes at 2 and 4 precede the bracket
    assert!(matches!(trace.events()[1], SolveEvent::Probe { x, .. } if x == 4.0));
}

#[test]
fn test_sentinel_round_trip() {
    for root in [Root::Finite(1.5), Root::Infeasible, Root::Divergent] {
        assert_eq!(Root::from_sentinel(root.to_sentinel()), root);
    }
}

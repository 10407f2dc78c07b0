use estimate_core::calculations::{
    apply_tax_and_contingency, calculate_estimate, calculate_estimate_total, calculate_line_item,
    compute_shed_estimate, CalculationResult, EstimateInput, LineItemInput, ShedInputs, TaxAndContingency,
};
use estimate_core::materials::ProjectCategory;
use estimate_core::settings::{CalculationSettings, DEFAULT_SETTINGS};
use estimate_core::settings_store::{FileSettingsStore, SettingsSource};
use estimate_core::units::{round_cents, Unit};

fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn line_item_costs_are_non_negative_and_sum_to_subtotal() {
    let quantities = [0.5, 1.0, 7.25, 50.0, 333.0];
    for category in ProjectCategory::ALL.iter().cloned().chain([ProjectCategory::from("Pool")]) {
        for unit in Unit::ALL.iter().cloned().chain([Unit::from("cubic yd")]) {
            for quantity in quantities {
                let result = calculate_line_item(&category, quantity, &unit, &DEFAULT_SETTINGS);
                let parts = [
                    result.labor_cost,
                    result.material_cost,
                    result.permit_cost,
                    result.disposal_cost,
                ];
                assert!(
                    parts.iter().all(|cost| *cost >= 0.0),
                    "negative cost for {category} / {unit} / {quantity}: {result:?}"
                );
                assert_close(
                    result.subtotal,
                    parts.iter().sum(),
                    0.025,
                    &format!("subtotal for {category} / {unit} / {quantity}"),
                );
            }
        }
    }
}

#[test]
fn estimate_total_is_zero_when_empty_and_ignores_order() {
    let none: Vec<CalculationResult> = Vec::new();
    assert_eq!(calculate_estimate_total(&none), 0.0);

    let results: Vec<CalculationResult> = [
        (ProjectCategory::Kitchen, 30.0, Unit::SquareFeet),
        (ProjectCategory::Plumbing, 3.0, Unit::Each),
        (ProjectCategory::Deck, 40.0, Unit::LinearFeet),
    ]
    .iter()
    .map(|(category, quantity, unit)| calculate_line_item(category, *quantity, unit, &DEFAULT_SETTINGS))
    .collect();

    let forward = calculate_estimate_total(&results);
    let reversed: Vec<CalculationResult> = results.iter().rev().copied().collect();
    assert_eq!(round_cents(forward), round_cents(calculate_estimate_total(&reversed)));
}

#[test]
fn estimate_total_matches_items_and_breakdown() {
    let input = EstimateInput {
        project_type: ProjectCategory::Bathroom,
        line_items: vec![
            LineItemInput::new("Tile floor", 60.0, Unit::SquareFeet),
            LineItemInput::new("Baseboard", 32.0, Unit::LinearFeet),
            LineItemInput::new("Vanity", 1.0, Unit::Each).with_notes("36 inch"),
            LineItemInput::new("Fixtures", 4.0, Unit::Each),
        ],
        settings: DEFAULT_SETTINGS,
    };

    let output = calculate_estimate(&input);
    assert_eq!(output.line_items.len(), 4);

    let item_sum: f64 = output.line_items.iter().map(|item| item.costs.subtotal).sum();
    assert_close(output.total_amount, item_sum, 0.01, "total vs item subtotals");
    assert_close(output.total_amount, output.breakdown.sum(), 0.1, "total vs breakdown");
}

#[test]
fn permit_fee_raises_the_subtotal() {
    let with_permits = calculate_line_item(&ProjectCategory::Kitchen, 50.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
    let without = CalculationSettings {
        permit_fee_enabled: false,
        ..DEFAULT_SETTINGS
    };
    let without_permits = calculate_line_item(&ProjectCategory::Kitchen, 50.0, &Unit::SquareFeet, &without);

    assert!(with_permits.subtotal > without_permits.subtotal);
    assert_eq!(without_permits.permit_cost, 0.0);
}

#[test]
fn reference_line_items() {
    let bathroom = calculate_line_item(&ProjectCategory::Bathroom, 20.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
    assert_close(bathroom.material_cost, 1500.0, 0.001, "bathroom material");

    let roofing = calculate_line_item(&ProjectCategory::Roofing, 100.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
    assert_eq!(roofing.labor_cost, 350.0);

    let deck = calculate_line_item(&ProjectCategory::Deck, 50.0, &Unit::LinearFeet, &DEFAULT_SETTINGS);
    assert_eq!(deck.labor_cost, 280.0);
}

#[test]
fn default_shed_estimate() {
    let result = compute_shed_estimate(&ShedInputs::default());

    assert!(result.line_items.len() > 5);
    assert!(result.materials_subtotal > 0.0);
    assert_eq!(result.contingency_percent, 10.0);
    assert_eq!(result.contingency_amount, round_cents(result.materials_subtotal * 0.1));
    assert_eq!(result.total_amount, result.materials_subtotal + result.contingency_amount);
    assert!(!result.sales_tax_enabled);
    assert_eq!(result.sales_tax_amount, 0.0);
}

#[test]
fn bigger_sheds_cost_more() {
    let small = compute_shed_estimate(&ShedInputs {
        width_ft: 8.0,
        length_ft: 8.0,
        ..ShedInputs::default()
    });
    let large = compute_shed_estimate(&ShedInputs {
        width_ft: 20.0,
        length_ft: 24.0,
        ..ShedInputs::default()
    });
    assert!(large.materials_subtotal > small.materials_subtotal);
}

#[test]
fn openings_follow_their_counts() {
    for (windows, doors) in [(0, 0), (0, 2), (3, 0), (4, 1)] {
        let result = compute_shed_estimate(&ShedInputs {
            window_count: windows,
            door_count: doors,
            ..ShedInputs::default()
        });

        match result.find_item("window") {
            Some(item) => assert_eq!(item.quantity, f64::from(windows)),
            None => assert_eq!(windows, 0),
        }
        match result.find_item("door") {
            Some(item) => assert_eq!(item.quantity, f64::from(doors)),
            None => assert_eq!(doors, 0),
        }
    }
}

#[test]
fn tax_and_contingency_reference_values() {
    let cases = [
        ((1000.0, true, 0.07, 10.0), (70.0, 100.0, 1170.0)),
        ((1000.0, false, 0.07, 10.0), (0.0, 100.0, 1100.0)),
        ((1000.0, false, 0.0, 15.0), (0.0, 150.0, 1150.0)),
    ];
    for ((subtotal, tax_enabled, rate, contingency), (tax, reserve, total)) in cases {
        assert_eq!(
            apply_tax_and_contingency(subtotal, tax_enabled, rate, contingency),
            TaxAndContingency {
                sales_tax_amount: tax,
                contingency_amount: reserve,
                total_amount: total,
            }
        );
    }
}

#[test]
fn settings_store_defaults_and_roundtrip() {
    let path = std::env::temp_dir().join(format!("renovo_properties_{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let store = FileSettingsStore::new(&path);
    assert_eq!(store.load_settings().unwrap(), DEFAULT_SETTINGS);
    assert!(!path.exists(), "loading must not create the settings file");

    let settings = CalculationSettings::from_form(40.0, 95.0, false).unwrap();
    store.save_settings(&settings).unwrap();
    assert_eq!(store.load_settings().unwrap(), settings);

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("json.lock"));
}

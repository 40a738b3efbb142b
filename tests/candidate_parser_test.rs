use rxverify::application::services::parse_candidates;
use rxverify::domain::VerificationStatus;

#[test]
fn given_json_array_when_parsing_then_preserves_count_and_trimmed_fields() {
    let raw = r#"[{"name": " Augmentin 625 Duo Tablet ", "dosage": " 1 tab twice daily "}, {"name": "Paracetamol 500mg", "dosage": ""}]"#;

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "Augmentin 625 Duo Tablet");
    assert_eq!(candidates[0].dosage, "1 tab twice daily");
    assert_eq!(candidates[0].status, None);
    assert_eq!(candidates[1].name, "Paracetamol 500mg");
    assert_eq!(candidates[1].dosage, "");
}

#[test]
fn given_fenced_json_when_parsing_then_strips_fences_and_parses() {
    let raw = "```json\n[{\"name\":\"A\",\"dosage\":\"1\"}]\n```";

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "A");
    assert_eq!(candidates[0].dosage, "1");
    assert_eq!(candidates[0].status, None);
}

#[test]
fn given_missing_dosage_field_when_parsing_then_defaults_to_empty() {
    let raw = r#"[{"name": "Metformin 500mg"}]"#;

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Metformin 500mg");
    assert_eq!(candidates[0].dosage, "");
}

#[test]
fn given_prose_when_parsing_then_returns_single_preset_fallback() {
    let raw = "I cannot read this image";

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "I cannot read this image");
    assert_eq!(candidates[0].dosage, "");
    assert_eq!(candidates[0].status, Some(VerificationStatus::NotVerified));
}

#[test]
fn given_json_object_when_parsing_then_falls_back_with_cleaned_text_as_name() {
    let raw = r#"{"name": "Augmentin", "dosage": "1 tab"}"#;

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, raw);
    assert_eq!(candidates[0].status, Some(VerificationStatus::NotVerified));
}

#[test]
fn given_malformed_json_when_parsing_then_falls_back_with_cleaned_text_as_name() {
    let raw = "[{\"name\": \"Augmentin\", ";

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, raw.trim());
    assert_eq!(candidates[0].status, Some(VerificationStatus::NotVerified));
}

#[test]
fn given_empty_input_when_parsing_then_falls_back_with_empty_name() {
    let candidates = parse_candidates("   \n  ");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "");
    assert_eq!(candidates[0].status, Some(VerificationStatus::NotVerified));
}

#[test]
fn given_empty_json_array_when_parsing_then_returns_empty_candidate_list() {
    let candidates = parse_candidates("[]");

    assert!(candidates.is_empty());
}

#[test]
fn given_fenced_prose_when_parsing_then_fallback_name_excludes_fences() {
    let raw = "```\nno medicines found\n```";

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "no medicines found");
    assert_eq!(candidates[0].status, Some(VerificationStatus::NotVerified));
}

#[test]
fn given_array_with_nameless_object_when_parsing_then_name_defaults_to_empty() {
    let raw = r#"[{"dosage": "1 tab"}]"#;

    let candidates = parse_candidates(raw);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "");
    assert_eq!(candidates[0].dosage, "1 tab");
    assert_eq!(candidates[0].status, None);
}

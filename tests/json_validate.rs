use kinetic::SiteContent;
use kinetic::content::ButtonAction;

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/site.json");
    let content = SiteContent::from_json_str(s).unwrap();
    assert_eq!(content.navigation.sections.len(), 4);
    assert_eq!(content.hero.title_words.len(), 4);
    assert_eq!(content.hero.buttons.primary.action, ButtonAction::Scroll);
    assert_eq!(content.process.steps.len(), 4);
    assert_eq!(content.works.as_ref().unwrap().items.len(), 2);
}

#[test]
fn fixture_roundtrips_through_serde() {
    let s = include_str!("data/site.json");
    let content = SiteContent::from_json_str(s).unwrap();
    let re = serde_json::to_string(&content).unwrap();
    let back = SiteContent::from_json_str(&re).unwrap();
    assert_eq!(
        back.navigation.sections,
        vec!["home", "about", "process", "contact"]
    );
    assert_eq!(back.contact.buttons.secondary.action, ButtonAction::Link);
}

#[test]
fn tampered_fixture_fails_validation() {
    let s = include_str!("data/site.json");
    let mut content = SiteContent::from_json_str(s).unwrap();
    content.hero.buttons.primary.target = "works".into();
    let err = content.validate().unwrap_err();
    assert!(err.to_string().contains("unknown section"));
}

use super::*;

#[test]
fn missing_color_falls_back_to_white() {
    assert_eq!(resolve_color(&NoTheme), "#FFFFFF");
}

#[test]
fn blank_color_falls_back_to_white() {
    let theme = || Some("   ".to_owned());
    assert_eq!(resolve_color(&theme), "#FFFFFF");
}

#[test]
fn color_is_trimmed() {
    let theme = || Some(" #7c3aed \n".to_owned());
    assert_eq!(resolve_color(&theme), "#7c3aed");
}

use super::*;

#[test]
fn format_cop_groups_thousands_with_dots() {
    assert_eq!(format_cop(0), "$0");
    assert_eq!(format_cop(950), "$950");
    assert_eq!(format_cop(1_000), "$1.000");
    assert_eq!(format_cop(180_000), "$180.000");
    assert_eq!(format_cop(45_000_000), "$45.000.000");
}

#[test]
fn format_cop_label_appends_currency() {
    assert_eq!(format_cop_label(25_000), "$25.000 COP");
}

#[test]
fn free_services_read_gratis() {
    assert_eq!(format_service_price(0), "Gratis");
    assert_eq!(format_service_price(80_000), "$80.000 COP");
}

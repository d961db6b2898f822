//! Surface area of a sphere, `A = 4πr²`, in exact decimal arithmetic.

use crate::core::decimal::Decimal;

#[must_use]
pub fn surface_area(radius: &Decimal, pi: &Decimal) -> Decimal {
    let four = Decimal::from(4u32);
    &(&(&four * pi) * radius) * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pi::pi;
    use rstest::rstest;

    #[rstest]
    #[case("10")]
    #[case("0.5")]
    #[case("6371.0088")]
    fn identity_holds_exactly(#[case] r: &str) {
        let radius: Decimal = r.parse().unwrap();
        let pi = pi(150).unwrap();
        let by_hand = &(&radius * &radius) * &(&pi * &Decimal::from(4u32));
        assert_eq!(surface_area(&radius, &pi), by_hand);
    }

    #[test]
    fn radius_ten() {
        let area = surface_area(&Decimal::from(10u32), &pi(150).unwrap());
        assert_eq!(area.truncate(6).to_string(), "1256.637061");
    }

    #[test]
    fn unit_pi_gives_four_r_squared() {
        let area = surface_area(&"2.5".parse().unwrap(), &Decimal::from(1u32));
        assert_eq!(area, "25".parse::<Decimal>().unwrap());
    }
}

//! The withdrawal validity check.
//!
//! Unlike the bot wizard, this form reports every violation at once: the UI
//! shows all field errors simultaneously, so nothing short-circuits.

use crate::WithdrawalForm;
use core_types::WithdrawalLimits;
use rust_decimal::Decimal;

/// Validates a withdrawal against the backend-supplied limits and balance.
///
/// `address_ok` is the backend's verdict on the address format for the chosen
/// network; it is only consulted when an address was entered at all. The
/// amount-bound checks presuppose a positive amount, so an amount of zero
/// yields exactly the "required and positive" message.
pub fn validate(
    form: &WithdrawalForm,
    limits: &WithdrawalLimits,
    available_balance: Decimal,
    address_ok: bool,
) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    if form.amount <= Decimal::ZERO {
        violations.push("Amount is required and must be positive".to_string());
    } else {
        if form.amount < limits.minimum_amount {
            violations.push(format!(
                "Minimum withdrawal is {} {}",
                limits.minimum_amount, form.currency
            ));
        }
        if form.amount > limits.maximum_amount {
            violations.push(format!(
                "Maximum withdrawal is {} {}",
                limits.maximum_amount, form.currency
            ));
        }
        if form.amount > available_balance {
            violations.push("Insufficient balance".to_string());
        }
        if form.amount > limits.remaining_today {
            violations.push(format!(
                "Daily limit exceeded. Remaining: {}",
                limits.remaining_today
            ));
        }
    }

    if form.address.trim().is_empty() {
        violations.push("Recipient address is required".to_string());
    } else if !address_ok {
        violations.push("Invalid address format".to_string());
    }

    if form.save_to_address_book && form.label.trim().is_empty() {
        violations.push("Label is required to save this address".to_string());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limits() -> WithdrawalLimits {
        WithdrawalLimits {
            minimum_amount: dec!(10),
            maximum_amount: dec!(1000),
            remaining_today: dec!(500),
        }
    }

    fn form(amount: Decimal) -> WithdrawalForm {
        WithdrawalForm {
            currency: "USDT".to_string(),
            network: "TRC20".to_string(),
            amount,
            address: "TX7k2...".to_string(),
            description: None,
            save_to_address_book: false,
            label: String::new(),
        }
    }

    #[test]
    fn a_valid_withdrawal_passes() {
        assert!(validate(&form(dec!(100)), &limits(), dec!(900), true).is_ok());
    }

    #[test]
    fn zero_amount_yields_exactly_the_positive_message() {
        let err = validate(&form(Decimal::ZERO), &limits(), dec!(900), true).unwrap_err();
        assert_eq!(err, vec!["Amount is required and must be positive".to_string()]);
    }

    #[test]
    fn each_bound_alone_yields_its_own_message() {
        let cases = [
            (dec!(5), dec!(900), "Minimum withdrawal is 10 USDT"),
            (dec!(2000), dec!(9000), "Maximum withdrawal is 1000 USDT"),
            (dec!(100), dec!(50), "Insufficient balance"),
            (dec!(600), dec!(900), "Daily limit exceeded. Remaining: 500"),
        ];
        for (amount, balance, expected) in cases {
            let err = validate(&form(amount), &limits(), balance, true).unwrap_err();
            assert!(
                err.contains(&expected.to_string()),
                "amount {} missing {:?}, got {:?}",
                amount,
                expected,
                err
            );
        }
        // The single-bound cases really are single-message cases.
        let err = validate(&form(dec!(5)), &limits(), dec!(900), true).unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn violations_are_collected_not_short_circuited() {
        let mut bad = form(dec!(2000));
        bad.address = String::new();
        bad.save_to_address_book = true;
        let err = validate(&bad, &limits(), dec!(50), true).unwrap_err();
        assert_eq!(
            err,
            vec![
                "Maximum withdrawal is 1000 USDT".to_string(),
                "Insufficient balance".to_string(),
                "Daily limit exceeded. Remaining: 500".to_string(),
                "Recipient address is required".to_string(),
                "Label is required to save this address".to_string(),
            ]
        );
    }

    #[test]
    fn malformed_address_is_reported() {
        let err = validate(&form(dec!(100)), &limits(), dec!(900), false).unwrap_err();
        assert_eq!(err, vec!["Invalid address format".to_string()]);
    }

    #[test]
    fn saving_requires_a_label() {
        let mut f = form(dec!(100));
        f.save_to_address_book = true;
        let err = validate(&f, &limits(), dec!(900), true).unwrap_err();
        assert_eq!(err, vec!["Label is required to save this address".to_string()]);

        f.label = "My cold wallet".to_string();
        assert!(validate(&f, &limits(), dec!(900), true).is_ok());
    }
}

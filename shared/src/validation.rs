//! Validation utilities for the AgriTrade Platform
//!
//! Includes Thailand-specific validations for employee and partner records.

use rust_decimal::Decimal;

// ============================================================================
// Ledger Validations
// ============================================================================

/// Validate that a quantity is strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate that a unit cost or price is strictly positive
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be positive");
    }
    Ok(())
}

/// Validate a warehouse capacity
pub fn validate_capacity(capacity: Decimal) -> Result<(), &'static str> {
    if capacity <= Decimal::ZERO {
        return Err("Capacity must be positive");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate username format (3-20 characters, ascii alphanumeric plus . _ -)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 20 {
        return Err("Username must be at most 20 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err("Username may contain only letters, digits, '.', '_' and '-'");
    }
    Ok(())
}

// ============================================================================
// Thailand-Specific Validations
// ============================================================================

/// Validate Thai phone number format
/// Accepts: 0812345678, 081-234-5678, +66812345678
pub fn validate_thai_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Thai mobile: 10 digits starting with 0 (e.g., 0812345678)
    if digits.len() == 10 && digits.starts_with('0') {
        return Ok(());
    }
    // International format without leading 0: 9 digits (e.g., 812345678)
    if digits.len() == 9 && !digits.starts_with('0') {
        return Ok(());
    }
    // International format with country code: 11 digits starting with 66
    if digits.len() == 11 && digits.starts_with("66") {
        return Ok(());
    }

    Err("Invalid Thai phone number format")
}

/// Validate Thai National ID (เลขประจำตัวประชาชน)
/// 13-digit number with checksum validation
pub fn validate_thai_national_id(id: &str) -> Result<(), &'static str> {
    let digits: String = id.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 13 {
        return Err("Thai National ID must be 13 digits");
    }

    // Checksum validation using modulo 11 algorithm
    let chars: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if chars.len() != 13 {
        return Err("Invalid Thai National ID format");
    }

    let mut sum = 0;
    for (i, &digit) in chars.iter().take(12).enumerate() {
        sum += digit * (13 - i as u32);
    }

    let check_digit = (11 - (sum % 11)) % 10;
    if check_digit != chars[12] {
        return Err("Invalid Thai National ID checksum");
    }

    Ok(())
}

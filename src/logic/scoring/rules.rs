//! Anomaly Scoring Rules & Thresholds
//!
//! Keyword lists, port lists, and rule scores. The exact lists, their
//! scores, and the evaluation order are part of the observable scoring
//! contract; any replacement scorer must reproduce them.

// ============================================================================
// TRAFFIC RULES
// ============================================================================

/// Destination ports commonly probed or abused (SSH, Telnet, SMTP, SMB,
/// RDP, Metasploit default, VNC)
pub const SUSPICIOUS_PORTS: [u16; 7] = [22, 23, 25, 445, 3389, 4444, 5900];

/// Score assigned by the suspicious-port rule
pub const SUSPICIOUS_PORT_SCORE: f64 = 0.7;

/// Verdict label of the suspicious-port rule
pub const SUSPICIOUS_PORT_TYPE: &str = "Suspicious Port Access";

/// Packet sizes strictly above this are flagged (bytes)
pub const LARGE_PACKET_BYTES: u64 = 10_000;

/// Score assigned by the large-packet rule
pub const LARGE_PACKET_SCORE: f64 = 0.8;

/// Verdict label of the large-packet rule
pub const LARGE_PACKET_TYPE: &str = "Large Packet Size";

// ============================================================================
// LOG RULES
// ============================================================================

/// Security keywords; any substring hit wins outright and skips the
/// error set
pub const SECURITY_KEYWORDS: [&str; 13] = [
    "failed login",
    "authentication failure",
    "permission denied",
    "unauthorized",
    "exploit",
    "injection",
    "overflow",
    "attack",
    "malware",
    "virus",
    "trojan",
    "ransomware",
    "breach",
];

/// Score assigned by the security-keyword rule
pub const SECURITY_KEYWORD_SCORE: f64 = 0.8;

/// Verdict label of the security-keyword rule
pub const SECURITY_KEYWORD_TYPE: &str = "Security Keyword Detected";

/// Error keywords; consulted only when no security keyword matched
pub const ERROR_KEYWORDS: [&str; 5] = ["error", "exception", "fail", "critical", "fatal"];

/// Score assigned by the error-keyword rule
pub const ERROR_KEYWORD_SCORE: f64 = 0.6;

/// Verdict label of the error-keyword rule
pub const ERROR_KEYWORD_TYPE: &str = "Error Pattern Detected";

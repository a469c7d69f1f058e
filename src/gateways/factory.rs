use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use super::authorize::AuthorizeGateway;
use super::gateway_trait::PaymentGateway;
use super::nmi::NmiGateway;

/// Closed set of logical gateway identifiers.
///
/// Adding a backend means adding a member here and a constructor entry in
/// the dispatch table below; nothing is registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailableGateway {
    /// Card-authorization processor (Authorize family)
    Authorize,
    /// NMI-family gateway
    Nmi,
}

impl AvailableGateway {
    pub fn name(&self) -> &'static str {
        match self {
            AvailableGateway::Authorize => "authorize",
            AvailableGateway::Nmi => "nmi",
        }
    }

    /// Resolve a string identifier; unrecognized names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "authorize" => Some(AvailableGateway::Authorize),
            "nmi" => Some(AvailableGateway::Nmi),
            _ => None,
        }
    }
}

impl fmt::Display for AvailableGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type GatewayConstructor = fn() -> Box<dyn PaymentGateway>;

/// Process-wide dispatch table, read-only after first use.
static GATEWAYS: LazyLock<HashMap<AvailableGateway, GatewayConstructor>> = LazyLock::new(|| {
    let mut table: HashMap<AvailableGateway, GatewayConstructor> = HashMap::new();
    table.insert(AvailableGateway::Authorize, || {
        Box::new(AuthorizeGateway::new())
    });
    table.insert(AvailableGateway::Nmi, || Box::new(NmiGateway::new()));
    table
});

/// Map a logical identifier to a fresh backend instance.
///
/// A `None` result means the gateway is unsupported; callers must treat it
/// as "gateway unavailable" and fail the enclosing transaction. Instances
/// are never cached here, each call constructs a new one.
pub fn select(gateway: AvailableGateway) -> Option<Box<dyn PaymentGateway>> {
    GATEWAYS.get(&gateway).map(|constructor| constructor())
}

/// [`select`] by string identifier; unrecognized names yield `None`.
pub fn select_by_name(name: &str) -> Option<Box<dyn PaymentGateway>> {
    AvailableGateway::from_name(name).and_then(select)
}

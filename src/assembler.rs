//! Tank assembler.
//!
//! Builds the monitored element tree of a tank from a registry and a layout:
//!
//! ```text
//! Monitored(Series "Tank Circuit Example")
//! ├── Monitored(Parallel "group1")
//! │   ├── Monitored(Single <group1[0]>)
//! │   └── ...
//! └── Monitored(Parallel "group2")
//!     ├── Monitored(Single <group2[0]>)
//!     └── ...
//! ```
//!
//! Every name is resolved before any element is built, so an unknown name
//! aborts assembly without leaving a partial tree.

use crate::element::{Element, Reading};
use crate::error::{Result, TankError};
use crate::ir::{ComponentSpec, TankLayout};
use crate::monitor::Observer;
use crate::registry::Registry;

pub const GROUP1_NAME: &str = "group1";
pub const GROUP2_NAME: &str = "group2";
pub const TANK_NAME: &str = "Tank Circuit Example";

/// An assembled tank: the monitored series root over the two banks.
#[derive(Debug, Clone)]
pub struct Tank {
    root: Element,
}

impl Tank {
    /// Run one calculation at `frequency` (Hz) with `current` (A) injected.
    /// All measurement state in the tree is overwritten.
    pub fn calculate(
        &mut self,
        frequency: f64,
        current: f64,
        observer: &mut dyn Observer,
    ) -> Reading {
        self.root.calculate(frequency, current, observer)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// The two parallel banks, in layout order.
    pub fn groups(&self) -> &[Element] {
        self.root.members()
    }
}

/// Assemble a tank from `layout`, looking every name up in `registry`.
pub fn assemble(registry: &Registry, layout: &TankLayout) -> Result<Tank> {
    let _span = tracing::info_span!("assemble").entered();

    let group1 = resolve(registry, &layout.group1, GROUP1_NAME)?;
    let group2 = resolve(registry, &layout.group2, GROUP2_NAME)?;
    tracing::debug!(group1 = group1.len(), group2 = group2.len(), "resolved group members");

    let bank1 = build_bank(GROUP1_NAME, &group1)?;
    let bank2 = build_bank(GROUP2_NAME, &group2)?;
    let root = Element::monitor(Element::series(TANK_NAME, vec![bank1, bank2])?);

    tracing::debug!(nodes = root.node_count(), "tank assembled");
    Ok(Tank { root })
}

fn resolve<'a>(
    registry: &'a Registry,
    names: &[String],
    group: &str,
) -> Result<Vec<&'a ComponentSpec>> {
    names
        .iter()
        .map(|name| {
            registry.get(name).ok_or_else(|| TankError::UnknownComponent {
                name: name.clone(),
                group: group.to_string(),
            })
        })
        .collect()
}

fn build_bank(name: &str, specs: &[&ComponentSpec]) -> Result<Element> {
    let members = specs
        .iter()
        .map(|spec| Element::monitor(Element::from_spec(spec)))
        .collect();
    Ok(Element::monitor(Element::parallel(name, members)?))
}

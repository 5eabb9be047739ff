use std::collections::BTreeMap;

use trackmap_core::viewport::{HostError, HostVariables};
use trackmap_protocol::QueryUpdate;

/// In-process stand-in for the host's URL query, shown in the status bar.
#[derive(Debug, Default)]
pub struct MemoryHost {
    vars: BTreeMap<String, f64>,
    pub updates: usize,
}

impl MemoryHost {
    pub fn vars(&self) -> impl Iterator<Item = (&str, f64)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl HostVariables for MemoryHost {
    fn update(&mut self, update: QueryUpdate) -> Result<(), HostError> {
        if !update.partial {
            self.vars.clear();
        }
        self.vars.extend(update.query);
        self.updates += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackmap_protocol::Bounds;

    #[test]
    fn partial_updates_merge() {
        let mut host = MemoryHost::default();
        host.vars.insert("var-other".into(), 1.0);
        host.update(QueryUpdate::viewport(&Bounds::new(1.0, 2.0, 3.0, 4.0)))
            .expect("memory host accepts updates");
        let vars: Vec<_> = host.vars().map(|(k, _)| k).collect();
        assert_eq!(
            vars,
            ["var-maxLat", "var-maxLon", "var-minLat", "var-minLon", "var-other"]
        );
        assert_eq!(host.updates, 1);
    }
}

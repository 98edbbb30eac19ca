//! Tree command implementation

use crate::cli::TreeArgs;
use crate::config::Config;
use crate::error::{Result, ScenarioError};
use crate::network::scenario::Scenario;
use crate::network::{AntennaId, Network, TargetId};
use crate::picker::{format_tree, AntennaPicker};

/// Run the tree command
pub fn run(args: TreeArgs, config: &Config) -> Result<()> {
    let output = render(&args, config)?;
    print!("{}", output);
    Ok(())
}

/// Build the antenna's tree and render it as text or JSON.
pub fn render(args: &TreeArgs, config: &Config) -> Result<String> {
    let scenario = Scenario::load_or_builtin(args.scenario.as_deref())?;
    let antenna = scenario.antenna_id(args.antenna.as_deref())?;
    let mut network = scenario.into_network();

    if let Some(name) = &args.target {
        let target = resolve_target(&network, name, antenna)?;
        network.set_target(antenna, target)?;
    }

    let picker = AntennaPicker::new(
        &network,
        antenna,
        config.picker.style(),
        config.picker.builder(),
    );
    let mut tree = picker.tree().clone();

    for name in &args.collapse {
        let id = TargetId::from_name(name);
        if !tree.set_expanded(id, false) {
            tracing::warn!(node = %name, "No such node to collapse");
        }
    }

    if args.json {
        let mut json = tree.to_json(true)?;
        json.push('\n');
        return Ok(json);
    }

    Ok(format_tree(&mut tree, config.picker.style(), args.colors))
}

/// Look up a body or satellite by name.
fn resolve_target(network: &Network, name: &str, antenna: AntennaId) -> Result<TargetId> {
    let id = TargetId::from_name(name);
    if network.view().target_name(id).is_some() {
        return Ok(id);
    }
    let antenna = network
        .antennas()
        .get(antenna)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    Err(ScenarioError::UnknownTarget {
        name: name.to_string(),
        antenna,
    }
    .into())
}

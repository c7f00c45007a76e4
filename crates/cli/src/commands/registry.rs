use anyhow::Result;
use axis_resolver::{AxisDescriptor, AxisRegistry, parse_tag};

/// Print all registered axes, or only `tag`.
pub fn print_registry(tag: Option<&str>) -> Result<()> {
    let registry = AxisRegistry::standard();
    match tag {
        Some(tag) => println!("{}", describe_axis(registry.require(parse_tag(tag)?)?)),
        None => {
            for axis in registry.iter() {
                println!("{}", describe_axis(axis));
            }
        }
    }
    Ok(())
}

pub fn describe_axis(axis: &AxisDescriptor) -> String {
    let step = if axis.is_discrete() { format!(", step {}", axis.step) } else { String::new() };
    format!(
        "{}: {} - {} (default: {}{step}) [{}]",
        axis.tag, axis.min, axis.max, axis.default, axis.role
    )
}

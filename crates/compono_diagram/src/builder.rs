//! DOT graph construction.
//!
//! The graph is built as a `dot_structures` AST and only printed at the end,
//! so callers can either post-process the AST or take the text directly.

use std::collections::BTreeMap;

use compono_model::{Area, Component, Diagram, Display};
use dot_structures::{Attribute, Edge, EdgeTy, Graph, Id, Node, NodeId, Stmt, Subgraph, Vertex};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use tracing::{debug, info, warn};

use crate::error::{DiagramError, DiagramResult};
use crate::options::RenderOptions;

/// Subgraph id of the team legend. Area clusters are all `cluster_area:<key>`,
/// so no area can share it.
const LEGEND_CLUSTER_ID: &str = "cluster_legend";

/// Component key to the DOT node placed for it.
pub type NodeTable<'a> = BTreeMap<&'a str, NodeId>;

/// Builds a DOT digraph from a [`Diagram`].
pub struct DiagramBuilder<'a> {
    diagram: &'a Diagram,
    options: RenderOptions,
}

impl<'a> DiagramBuilder<'a> {
    pub fn new(diagram: &'a Diagram) -> Self {
        Self {
            diagram,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the graph.
    ///
    /// Areas are emitted first, recursively from every root area, and return
    /// the nodes they placed. Dependency edges are added in a second pass over
    /// that table, so every dependency must resolve to a placed component.
    pub fn build(&self) -> DiagramResult<Graph> {
        let mut stmts = vec![Stmt::Attribute(attr("rankdir", self.options.rank_dir.as_str()))];

        if self.options.include_team_legend && !self.diagram.teams.is_empty() {
            stmts.push(Stmt::Subgraph(self.team_legend()));
        }

        let mut nodes = NodeTable::new();
        for (key, area) in self.diagram.root_areas() {
            let (cluster, placed) = self.area_cluster(key, area);
            stmts.push(Stmt::Subgraph(cluster));
            nodes.extend(placed);
        }

        let edges = self.dependency_edges(&nodes)?;
        info!(
            "Built diagram with {} node(s) and {} dependency edge(s)",
            nodes.len(),
            edges.len()
        );
        stmts.extend(edges);

        Ok(Graph::DiGraph {
            id: Id::Plain("architecture".to_string()),
            strict: false,
            stmts,
        })
    }

    /// Build the graph and print it as DOT text.
    pub fn render(&self) -> DiagramResult<String> {
        let graph = self.build()?;
        Ok(graph.print(&mut PrinterContext::default()))
    }

    /// One cluster for `area`, holding its child areas and then one
    /// rank-aligned group per level of the components it owns directly.
    fn area_cluster(&self, area_key: &'a str, area: &'a Area) -> (Subgraph, NodeTable<'a>) {
        debug!("Adding area '{}' ({})", area.name, area_key);

        let mut stmts = vec![Stmt::Attribute(attr("label", display_name(&area.name, area_key)))];
        let mut nodes = NodeTable::new();

        for (child_key, child) in self.diagram.child_areas(area_key) {
            let (cluster, placed) = self.area_cluster(child_key, child);
            stmts.push(Stmt::Subgraph(cluster));
            nodes.extend(placed);
        }

        let levels = group_by_level(self.diagram.components_in_area(area_key));
        for (index, (level_key, members)) in levels.into_iter().enumerate() {
            let (group, placed) = self.level_group(area_key, index, level_key, &members);
            stmts.push(Stmt::Subgraph(group));
            nodes.extend(placed);
        }

        let cluster = Subgraph {
            id: quoted(&area_cluster_id(area_key)),
            stmts,
        };
        (cluster, nodes)
    }

    fn level_group(
        &self,
        area_key: &str,
        index: usize,
        level_key: &str,
        members: &[(&'a str, &'a Component)],
    ) -> (Subgraph, NodeTable<'a>) {
        if !level_key.is_empty() && !self.diagram.levels.contains_key(level_key) {
            debug!("Level '{}' used in area '{}' is not declared", level_key, area_key);
        }

        let mut stmts = vec![Stmt::Attribute(attr("rank", "same"))];
        let mut nodes = NodeTable::new();

        for (key, component) in members {
            let id = component_node(key);
            let mut attributes = vec![attr("label", display_name(&component.name, key))];

            if self.options.style_by_team {
                match self.diagram.team_for(component) {
                    Some(team) => attributes.extend(fill(&team.display)),
                    None if !component.team_key.is_empty() => {
                        warn!(
                            "Component '{}' references unknown team '{}'",
                            key, component.team_key
                        );
                    }
                    None => {}
                }
            }

            stmts.push(Stmt::Node(Node {
                id: id.clone(),
                attributes,
            }));
            nodes.insert(*key, id);
        }

        let ids: Vec<NodeId> = members.iter().map(|(key, _)| component_node(key)).collect();
        stmts.extend(invisible_chain(&ids));

        let group = Subgraph {
            id: quoted(&level_group_id(area_key, index)),
            stmts,
        };
        (group, nodes)
    }

    /// A rank-aligned row of team nodes, each filled with its own colors.
    fn team_legend(&self) -> Subgraph {
        let mut stmts = vec![
            Stmt::Attribute(attr("label", "Teams")),
            Stmt::Attribute(attr("rank", "same")),
        ];
        let mut ids = Vec::with_capacity(self.diagram.teams.len());

        for (key, team) in &self.diagram.teams {
            let id = team_node(key);
            let mut attributes = vec![attr("label", display_name(&team.name, key))];
            attributes.extend(fill(&team.display));

            stmts.push(Stmt::Node(Node {
                id: id.clone(),
                attributes,
            }));
            ids.push(id);
        }
        stmts.extend(invisible_chain(&ids));

        Subgraph {
            id: quoted(LEGEND_CLUSTER_ID),
            stmts,
        }
    }

    fn dependency_edges(&self, nodes: &NodeTable<'a>) -> DiagramResult<Vec<Stmt>> {
        let mut edges = Vec::new();

        for (key, component) in &self.diagram.components {
            for dependency in &component.dependency_keys {
                let from = nodes
                    .get(key.as_str())
                    .ok_or_else(|| DiagramError::UnplacedComponent(key.clone()))?;
                let to = nodes.get(dependency.as_str()).ok_or_else(|| {
                    if self.diagram.components.contains_key(dependency) {
                        DiagramError::UnplacedComponent(dependency.clone())
                    } else {
                        DiagramError::UnknownDependency {
                            component: key.clone(),
                            dependency: dependency.clone(),
                        }
                    }
                })?;

                edges.push(edge(from, to, vec![attr("constraint", "false")]));
            }
        }

        Ok(edges)
    }
}

/// Partition components by level key, keeping first-appearance order.
fn group_by_level<'a>(
    components: impl Iterator<Item = (&'a str, &'a Component)>,
) -> Vec<(&'a str, Vec<(&'a str, &'a Component)>)> {
    let mut groups: Vec<(&str, Vec<(&str, &Component)>)> = Vec::new();

    for (key, component) in components {
        let level = component.level_key.as_str();
        match groups.iter_mut().find(|(existing, _)| *existing == level) {
            Some((_, members)) => members.push((key, component)),
            None => groups.push((level, vec![(key, component)])),
        }
    }

    groups
}

/// Invisible, undirected edges between consecutive nodes. Inside a
/// `rank=same` group this lines the nodes up without drawing anything.
fn invisible_chain(ids: &[NodeId]) -> Vec<Stmt> {
    ids.windows(2)
        .map(|pair| {
            edge(
                &pair[0],
                &pair[1],
                vec![attr("style", "invis"), attr("dir", "none")],
            )
        })
        .collect()
}

fn fill(display: &Display) -> Vec<Attribute> {
    if display.is_empty() {
        return Vec::new();
    }

    let mut attributes = vec![attr("style", "filled")];
    if !display.background_color.is_empty() {
        attributes.push(attr("color", &display.background_color));
    }
    if !display.foreground_color.is_empty() {
        attributes.push(attr("fontcolor", &display.foreground_color));
    }
    attributes
}

fn display_name<'s>(name: &'s str, key: &'s str) -> &'s str {
    if name.is_empty() {
        key
    } else {
        name
    }
}

fn edge(from: &NodeId, to: &NodeId, attributes: Vec<Attribute>) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(Vertex::N(from.clone()), Vertex::N(to.clone())),
        attributes,
    })
}

fn area_cluster_id(area_key: &str) -> String {
    format!("cluster_area:{}", area_key)
}

/// Level groups are numbered within their area. The index is the part after
/// the last `#`, so any area key maps to a distinct prefix.
fn level_group_id(area_key: &str, index: usize) -> String {
    format!("level:{}#{}", area_key, index)
}

fn component_node(key: &str) -> NodeId {
    NodeId(quoted(&format!("component:{}", key)), None)
}

fn team_node(key: &str) -> NodeId {
    NodeId(quoted(&format!("team:{}", key)), None)
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(name.to_string()), quoted(value))
}

/// A double-quoted DOT identifier.
fn quoted(value: &str) -> Id {
    Id::Escaped(format!(
        "\"{}\"",
        value.replace('\\', "\\\\").replace('"', "\\\"")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compono_model::{Area, Team};

    fn unquote(id: &Id) -> String {
        match id {
            Id::Escaped(value) => value.trim_matches('"').to_string(),
            Id::Plain(value) | Id::Html(value) | Id::Anonymous(value) => value.clone(),
        }
    }

    fn attribute(attributes: &[Attribute], name: &str) -> Option<String> {
        attributes
            .iter()
            .find(|Attribute(key, _)| unquote(key) == name)
            .map(|Attribute(_, value)| unquote(value))
    }

    fn stmts(graph: &Graph) -> &[Stmt] {
        match graph {
            Graph::DiGraph { stmts, .. } | Graph::Graph { stmts, .. } => stmts,
        }
    }

    fn subgraphs(stmts: &[Stmt]) -> Vec<&Subgraph> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .collect()
    }

    fn nodes(stmts: &[Stmt]) -> Vec<&Node> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Node(node) => Some(node),
                _ => None,
            })
            .collect()
    }

    fn edges(stmts: &[Stmt]) -> Vec<(String, String, &[Attribute])> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Edge(Edge {
                    ty: EdgeTy::Pair(Vertex::N(from), Vertex::N(to)),
                    attributes,
                }) => Some((unquote(&from.0), unquote(&to.0), attributes.as_slice())),
                _ => None,
            })
            .collect()
    }

    /// Every subgraph id and every node id below `stmts`, in visit order.
    fn all_ids(stmts: &[Stmt], subgraph_ids: &mut Vec<String>, node_ids: &mut Vec<String>) {
        for stmt in stmts {
            match stmt {
                Stmt::Subgraph(subgraph) => {
                    subgraph_ids.push(unquote(&subgraph.id));
                    all_ids(&subgraph.stmts, subgraph_ids, node_ids);
                }
                Stmt::Node(node) => node_ids.push(unquote(&node.id.0)),
                _ => {}
            }
        }
    }

    fn assert_distinct(ids: &[String]) {
        let mut seen = std::collections::HashSet::new();
        for id in ids {
            assert!(seen.insert(id), "id `{}` emitted twice in {:?}", id, ids);
        }
    }

    fn level_diagram() -> Diagram {
        let mut diagram = Diagram::new();
        diagram.areas.insert("core".into(), Area::new("Core"));
        for key in ["a", "b", "c"] {
            diagram.components.insert(
                key.into(),
                Component::new(key.to_uppercase()).in_area("core").at_level("apis"),
            );
        }
        diagram
            .components
            .insert("db".into(), Component::new("DB").in_area("core").at_level("data"));
        diagram
    }

    #[test]
    fn test_empty_diagram_has_rankdir_only() {
        let diagram = Diagram::new();
        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let stmts = stmts(&graph);

        assert_eq!(stmts.len(), 1);
        assert!(matches!(
            &stmts[0],
            Stmt::Attribute(Attribute(Id::Plain(name), value)) if name == "rankdir" && unquote(value) == "LR"
        ));
    }

    #[test]
    fn test_levels_are_rank_aligned_groups() {
        let diagram = level_diagram();
        let graph = DiagramBuilder::new(&diagram).build().unwrap();

        let clusters = subgraphs(stmts(&graph));
        assert_eq!(clusters.len(), 1);
        assert_eq!(unquote(&clusters[0].id), "cluster_area:core");

        let groups = subgraphs(&clusters[0].stmts);
        let ids: Vec<_> = groups.iter().map(|group| unquote(&group.id)).collect();
        assert_eq!(ids, vec!["level:core#0", "level:core#1"]);

        let apis = groups[0];
        assert!(apis.stmts.iter().any(|stmt| matches!(
            stmt,
            Stmt::Attribute(Attribute(name, value)) if unquote(name) == "rank" && unquote(value) == "same"
        )));
        assert_eq!(nodes(&apis.stmts).len(), 3);

        let chain = edges(&apis.stmts);
        let pairs: Vec<_> = chain.iter().map(|(from, to, _)| (from.as_str(), to.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("component:a", "component:b"), ("component:b", "component:c")]
        );
        for (_, _, attributes) in &chain {
            assert_eq!(attribute(attributes, "style").as_deref(), Some("invis"));
            assert_eq!(attribute(attributes, "dir").as_deref(), Some("none"));
        }

        assert!(edges(&groups[1].stmts).is_empty());
    }

    #[test]
    fn test_nested_areas() {
        let mut diagram = Diagram::new();
        diagram.areas.insert("edge".into(), Area::new("Edge").with_parent("core"));
        diagram.areas.insert("core".into(), Area::new("Core"));

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let roots = subgraphs(stmts(&graph));
        assert_eq!(roots.len(), 1);
        assert_eq!(unquote(&roots[0].id), "cluster_area:core");

        let children = subgraphs(&roots[0].stmts);
        assert_eq!(children.len(), 1);
        assert_eq!(unquote(&children[0].id), "cluster_area:edge");
        assert!(children[0].stmts.iter().any(|stmt| matches!(
            stmt,
            Stmt::Attribute(Attribute(name, value)) if unquote(name) == "label" && unquote(value) == "Edge"
        )));
    }

    #[test]
    fn test_dependency_edge_is_non_constraining() {
        let mut diagram = level_diagram();
        diagram.components["a"].dependency_keys.push("db".into());

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let top = edges(stmts(&graph));
        assert_eq!(top.len(), 1);
        assert_eq!((top[0].0.as_str(), top[0].1.as_str()), ("component:a", "component:db"));
        assert_eq!(attribute(top[0].2, "constraint").as_deref(), Some("false"));
    }

    #[test]
    fn test_unknown_dependency_fails() {
        let mut diagram = level_diagram();
        diagram.components["a"].dependency_keys.push("ghost".into());

        let err = DiagramBuilder::new(&diagram).build().unwrap_err();
        assert_eq!(
            err,
            DiagramError::UnknownDependency {
                component: "a".into(),
                dependency: "ghost".into(),
            }
        );
    }

    #[test]
    fn test_unplaced_components_fail_only_with_edges() {
        let mut diagram = level_diagram();
        diagram
            .components
            .insert("lost".into(), Component::new("Lost").in_area("nowhere"));
        assert!(DiagramBuilder::new(&diagram).build().is_ok());

        diagram.components["lost"].dependency_keys.push("a".into());
        assert_eq!(
            DiagramBuilder::new(&diagram).build().unwrap_err(),
            DiagramError::UnplacedComponent("lost".into())
        );

        diagram.components["lost"].dependency_keys.clear();
        diagram.components["b"].dependency_keys.push("lost".into());
        assert_eq!(
            DiagramBuilder::new(&diagram).build().unwrap_err(),
            DiagramError::UnplacedComponent("lost".into())
        );
    }

    #[test]
    fn test_team_styling_toggle() {
        let mut diagram = level_diagram();
        diagram.teams.insert(
            "platform".into(),
            Team::new("Platform").with_display(Display::new("#003366", "white")),
        );
        diagram.components["a"].team_key = "platform".into();

        let styled = DiagramBuilder::new(&diagram).build().unwrap();
        let clusters = subgraphs(stmts(&styled));
        let core = clusters.iter().find(|s| unquote(&s.id) == "cluster_area:core").unwrap();
        let apis = subgraphs(&core.stmts)[0];
        let a = nodes(&apis.stmts)[0];
        assert_eq!(attribute(&a.attributes, "style").as_deref(), Some("filled"));
        assert_eq!(attribute(&a.attributes, "color").as_deref(), Some("#003366"));
        assert_eq!(attribute(&a.attributes, "fontcolor").as_deref(), Some("white"));

        let plain = DiagramBuilder::new(&diagram)
            .with_options(RenderOptions::default().with_team_style(false))
            .build()
            .unwrap();
        let clusters = subgraphs(stmts(&plain));
        let core = clusters.iter().find(|s| unquote(&s.id) == "cluster_area:core").unwrap();
        let a = nodes(&subgraphs(&core.stmts)[0].stmts)[0];
        assert_eq!(attribute(&a.attributes, "label").as_deref(), Some("A"));
        assert!(attribute(&a.attributes, "style").is_none());
    }

    #[test]
    fn test_team_legend_toggle() {
        let mut diagram = Diagram::new();
        diagram.teams.insert(
            "platform".into(),
            Team::new("Platform").with_display(Display::new("#003366", "white")),
        );
        diagram.teams.insert("data".into(), Team::new("Data"));

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let legend = subgraphs(stmts(&graph));
        assert_eq!(legend.len(), 1);
        assert_eq!(unquote(&legend[0].id), "cluster_legend");

        let team_nodes = nodes(&legend[0].stmts);
        assert_eq!(team_nodes.len(), 2);
        assert_eq!(unquote(&team_nodes[0].id.0), "team:platform");
        assert_eq!(attribute(&team_nodes[0].attributes, "color").as_deref(), Some("#003366"));
        assert!(attribute(&team_nodes[1].attributes, "style").is_none());

        let chain = edges(&legend[0].stmts);
        assert_eq!(chain.len(), 1);
        assert_eq!(attribute(chain[0].2, "style").as_deref(), Some("invis"));

        let without = DiagramBuilder::new(&diagram)
            .with_options(RenderOptions::default().with_team_legend(false))
            .build()
            .unwrap();
        assert!(subgraphs(stmts(&without)).is_empty());
    }

    #[test]
    fn test_label_falls_back_to_key_and_is_escaped() {
        let mut diagram = Diagram::new();
        diagram.areas.insert("core".into(), Area::new(""));
        diagram.components.insert(
            "quote".into(),
            Component::new("Say \"hi\"").in_area("core"),
        );

        let dot = DiagramBuilder::new(&diagram).render().unwrap();
        assert!(dot.contains(r#""core""#));
        assert!(dot.contains(r#""Say \"hi\"""#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut diagram = level_diagram();
        diagram.components["c"].dependency_keys.push("db".into());

        let builder = DiagramBuilder::new(&diagram);
        assert_eq!(builder.render().unwrap(), builder.render().unwrap());
    }

    #[test]
    fn test_area_named_like_legend_keeps_own_cluster() {
        let mut diagram = Diagram::new();
        diagram.areas.insert("teams".into(), Area::new("Teams Area"));
        diagram.areas.insert("legend".into(), Area::new("Legend Area"));
        diagram.teams.insert("t".into(), Team::new("T"));

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let ids: Vec<_> = subgraphs(stmts(&graph)).iter().map(|s| unquote(&s.id)).collect();
        assert_eq!(
            ids,
            vec!["cluster_legend", "cluster_area:teams", "cluster_area:legend"]
        );
    }

    #[test]
    fn test_component_and_team_nodes_never_share_ids() {
        let mut diagram = Diagram::new();
        diagram.areas.insert("core".into(), Area::new("Core"));
        diagram.teams.insert("t".into(), Team::new("T"));
        for key in ["t", "team_t", "team:t"] {
            diagram
                .components
                .insert(key.into(), Component::new("Svc").in_area("core"));
        }

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let (mut subgraph_ids, mut node_ids) = (Vec::new(), Vec::new());
        all_ids(stmts(&graph), &mut subgraph_ids, &mut node_ids);

        assert_eq!(node_ids.len(), 4);
        assert_distinct(&node_ids);
        assert!(node_ids.contains(&"team:t".to_string()));
        assert!(node_ids.contains(&"component:team:t".to_string()));
    }

    #[test]
    fn test_level_groups_in_different_areas_stay_apart() {
        let mut diagram = Diagram::new();
        for key in ["a_b", "a", "a#0"] {
            diagram.areas.insert(key.into(), Area::new(key));
        }
        diagram
            .components
            .insert("x".into(), Component::new("X").in_area("a_b").at_level("c"));
        diagram
            .components
            .insert("y".into(), Component::new("Y").in_area("a").at_level("b_c"));
        diagram
            .components
            .insert("y2".into(), Component::new("Y2").in_area("a").at_level("0"));
        diagram
            .components
            .insert("z".into(), Component::new("Z").in_area("a#0").at_level("c"));

        let graph = DiagramBuilder::new(&diagram).build().unwrap();
        let (mut subgraph_ids, mut node_ids) = (Vec::new(), Vec::new());
        all_ids(stmts(&graph), &mut subgraph_ids, &mut node_ids);

        let levels: Vec<_> = subgraph_ids.iter().filter(|id| id.starts_with("level:")).collect();
        assert_eq!(levels.len(), 4);
        assert_distinct(&subgraph_ids);
    }
}

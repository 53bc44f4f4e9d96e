use super::paging::{MovieSort, PagingSpec, PersonSort, SortKey};
use crate::store::GraphQuery;

pub(crate) const MOVIE_COLUMNS: &[&str] = &["movie"];
pub(crate) const PERSON_COLUMNS: &[&str] = &["person"];

/// Which movies a list query starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    All,
    Genre(String),
    Actor(String),
    Director(String),
}

impl MovieFilter {
    fn pattern(&self) -> &'static str {
        match self {
            MovieFilter::All => "MATCH (m:Movie)",
            MovieFilter::Genre(_) => "MATCH (m:Movie)-[:IN_GENRE]->(:Genre {name: $name})",
            MovieFilter::Actor(_) => "MATCH (:Person {tmdbId: $id})-[:ACTED_IN]->(m:Movie)",
            MovieFilter::Director(_) => "MATCH (:Person {tmdbId: $id})-[:DIRECTED]->(m:Movie)",
        }
    }

    fn bind(&self, query: GraphQuery) -> GraphQuery {
        match self {
            MovieFilter::All => query,
            MovieFilter::Genre(name) => query.param("name", name.as_str()),
            MovieFilter::Actor(id) | MovieFilter::Director(id) => query.param("id", id.as_str()),
        }
    }
}

fn order_clause<S: SortKey>(alias: &str, paging: &PagingSpec<S>) -> String {
    format!(
        "ORDER BY {alias}.`{}` {}, {alias}.tmdbId ASC",
        paging.sort.property(),
        paging.order.keyword()
    )
}

pub(crate) fn bind_page<S: SortKey>(query: GraphQuery, paging: &PagingSpec<S>) -> GraphQuery {
    query.param("skip", paging.skip).param("limit", paging.limit)
}

/// Movies matching `filter`, ordered and windowed by `paging`. Movies without
/// a value for the sort property are left out.
pub fn movie_list(filter: &MovieFilter, paging: &PagingSpec<MovieSort>) -> GraphQuery {
    let text = format!(
        "
    {pattern}
    WHERE m.`{sort}` IS NOT NULL
    RETURN m {{ .* }} AS movie
    {order}
    SKIP $skip
    LIMIT $limit",
        pattern = filter.pattern(),
        sort = paging.sort.property(),
        order = order_clause("m", paging),
    );

    bind_page(filter.bind(GraphQuery::new(text, MOVIE_COLUMNS)), paging)
}

pub fn movie_detail(id: &str) -> GraphQuery {
    GraphQuery::new(
        "
    MATCH (m:Movie {tmdbId: $id})
    RETURN m {
        .*,
        actors: [ (a:Person)-[r:ACTED_IN]->(m) | a { .*, role: r.role } ],
        directors: [ (d:Person)-[:DIRECTED]->(m) | d { .* } ],
        genres: [ (m)-[:IN_GENRE]->(g:Genre) | g.name ],
        ratingCount: count { (m)<-[:RATED]-() }
    } AS movie
    LIMIT 1",
        MOVIE_COLUMNS,
    )
    .param("id", id)
}

/// People, optionally narrowed to names containing the paging query
/// (case-insensitive).
pub fn person_list(paging: &PagingSpec<PersonSort>) -> GraphQuery {
    let text = format!(
        "
    MATCH (p:Person)
    WHERE $q IS NULL OR toLower(p.name) CONTAINS toLower($q)
    RETURN p {{ .* }} AS person
    {order}
    SKIP $skip
    LIMIT $limit",
        order = order_clause("p", paging),
    );

    bind_page(
        GraphQuery::new(text, PERSON_COLUMNS).param("q", paging.query.clone()),
        paging,
    )
}

pub fn person_detail(id: &str) -> GraphQuery {
    GraphQuery::new(
        "
    MATCH (p:Person {tmdbId: $id})
    RETURN p {
        .*,
        actedCount: count { (p)-[:ACTED_IN]->() },
        directedCount: count { (p)-[:DIRECTED]->() }
    } AS person
    LIMIT 1",
        PERSON_COLUMNS,
    )
    .param("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::paging::SortOrder;
    use crate::store::Param;

    #[test]
    fn test_movie_list_all() {
        let paging = PagingSpec::new(MovieSort::Title, SortOrder::Asc, 0, 6);
        let query = movie_list(&MovieFilter::All, &paging);

        assert!(query.text.contains("MATCH (m:Movie)\n"));
        assert!(query.text.contains("WHERE m.`title` IS NOT NULL"));
        assert!(query.text.contains("ORDER BY m.`title` ASC, m.tmdbId ASC"));
        assert!(query.text.contains("SKIP $skip"));
        assert!(query.text.contains("LIMIT $limit"));
        assert_eq!(query.get_param("skip"), Some(&Param::Integer(0)));
        assert_eq!(query.get_param("limit"), Some(&Param::Integer(6)));
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.columns, &["movie"]);
    }

    #[test]
    fn test_movie_list_by_genre_binds_name() {
        let paging = PagingSpec::new(MovieSort::Released, SortOrder::Desc, 4, 2);
        let query = movie_list(&MovieFilter::Genre("Action".to_string()), &paging);

        assert!(query.text.contains("-[:IN_GENRE]->(:Genre {name: $name})"));
        assert!(query.text.contains("ORDER BY m.`released` DESC, m.tmdbId ASC"));
        assert!(!query.text.contains("Action"));
        assert_eq!(query.get_param("name"), Some(&Param::Text("Action".to_string())));
        assert_eq!(query.get_param("skip"), Some(&Param::Integer(4)));
    }

    #[test]
    fn test_movie_list_by_person_binds_id() {
        let paging = PagingSpec::default();
        let acted = movie_list(&MovieFilter::Actor("8891".to_string()), &paging);
        let directed = movie_list(&MovieFilter::Director("8891".to_string()), &paging);

        assert!(acted.text.contains("(:Person {tmdbId: $id})-[:ACTED_IN]->(m:Movie)"));
        assert!(directed.text.contains("(:Person {tmdbId: $id})-[:DIRECTED]->(m:Movie)"));
        for query in [acted, directed] {
            assert!(!query.text.contains("8891"));
            assert_eq!(query.get_param("id"), Some(&Param::Text("8891".to_string())));
        }
    }

    #[test]
    fn test_person_list_query_param() {
        let mut paging = PagingSpec::new(PersonSort::Born, SortOrder::Desc, 0, 10);
        let query = person_list(&paging);
        assert_eq!(query.get_param("q"), Some(&Param::Null));
        assert!(query.text.contains("toLower(p.name) CONTAINS toLower($q)"));
        assert!(query.text.contains("ORDER BY p.`born` DESC, p.tmdbId ASC"));

        paging.query = Some("o'brien".to_string());
        let query = person_list(&paging);
        assert!(!query.text.contains("o'brien"));
        assert_eq!(query.get_param("q"), Some(&Param::Text("o'brien".to_string())));
    }

    #[test]
    fn test_detail_queries() {
        let movie = movie_detail("603");
        assert!(movie.text.contains("ratingCount"));
        assert!(movie.text.contains("LIMIT 1"));
        assert_eq!(movie.get_param("id"), Some(&Param::Text("603".to_string())));

        let person = person_detail("6384");
        assert!(person.text.contains("actedCount"));
        assert!(person.text.contains("directedCount"));
        assert_eq!(person.columns, &["person"]);
    }
}

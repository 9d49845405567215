use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Genre")]
    pub genre: Genre,
    #[serde(rename = "Director")]
    pub director: Director,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<String>,
}

#[derive(Deserialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<String>,
}

#[derive(Deserialize)]
pub struct Login {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Birthday")]
    pub birthday: Option<String>,
}

#[derive(Default)]
pub struct Store {
    pub movies: Vec<Movie>,
    pub users: HashMap<String, User>,
    /// token -> username
    pub sessions: HashMap<String, String>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        movies: seed_movies(),
        ..Store::default()
    }));
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
        .route("/movies", get(list_movies))
        .route("/movies/{title}", get(get_movie))
        .route("/movies/director/{name}", get(get_director))
        .route("/movies/genre/{name}", get(get_genre))
        .route(
            "/users/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/{username}/movies/{movie_id}",
            get(get_favorite).post(add_favorite).delete(remove_favorite),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn seed_movies() -> Vec<Movie> {
    let nolan = Director {
        name: "Christopher Nolan".to_string(),
        bio: "British-American filmmaker.".to_string(),
    };
    let thriller = Genre {
        name: "Thriller".to_string(),
        description: "Suspense-driven stories.".to_string(),
    };
    vec![
        Movie {
            id: "1".to_string(),
            title: "Inception".to_string(),
            description: "A thief who steals corporate secrets through dreams.".to_string(),
            genre: thriller.clone(),
            director: nolan.clone(),
        },
        Movie {
            id: "2".to_string(),
            title: "Memento".to_string(),
            description: "A man with short-term memory loss hunts a killer.".to_string(),
            genre: thriller,
            director: nolan,
        },
        Movie {
            id: "3".to_string(),
            title: "Spirited Away".to_string(),
            description: "A girl wanders into a world of spirits.".to_string(),
            genre: Genre {
                name: "Animation".to_string(),
                description: "Drawn or computer-generated films.".to_string(),
            },
            director: Director {
                name: "Hayao Miyazaki".to_string(),
                bio: "Japanese animator and co-founder of Studio Ghibli.".to_string(),
            },
        },
    ]
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

/// Resolve the bearer token to a session; anything else is a 401.
fn authorize(store: &Store, headers: &HeaderMap) -> ApiResult<String> {
    let unauthorized = || (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;
    store.sessions.get(token).cloned().ok_or_else(unauthorized)
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<Registration>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let mut store = db.write().await;
    if store.users.contains_key(&input.username) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} already exists", input.username),
        ));
    }
    let user = User {
        username: input.username,
        password: input.password,
        email: input.email,
        birthday: input.birthday,
        favorite_movies: Vec::new(),
    };
    store.users.insert(user.username.clone(), user.clone());
    tracing::info!(username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(State(db): State<Db>, Json(input): Json<Login>) -> ApiResult<Json<LoginResponse>> {
    let mut store = db.write().await;
    let user = store
        .users
        .get(&input.username)
        .filter(|u| u.password == input.password)
        .cloned()
        .ok_or((StatusCode::UNAUTHORIZED, "Incorrect username or password".to_string()))?;
    let token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), user.username.clone());
    tracing::info!(username = %user.username, "session opened");
    Ok(Json(LoginResponse { user, token }))
}

async fn list_movies(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<Vec<Movie>>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    Ok(Json(store.movies.clone()))
}

async fn get_movie(
    State(db): State<Db>,
    Path(title): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Movie>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    store
        .movies
        .iter()
        .find(|m| m.title == title)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Movie"))
}

async fn get_director(
    State(db): State<Db>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Director>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    store
        .movies
        .iter()
        .find(|m| m.director.name == name)
        .map(|m| Json(m.director.clone()))
        .ok_or_else(|| not_found("Director"))
}

async fn get_genre(
    State(db): State<Db>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Genre>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    store
        .movies
        .iter()
        .find(|m| m.genre.name == name)
        .map(|m| Json(m.genre.clone()))
        .ok_or_else(|| not_found("Genre"))
}

async fn get_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    store
        .users
        .get(&username)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("User"))
}

async fn update_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    if !store.users.contains_key(&username) {
        return Err(not_found("User"));
    }
    if let Some(new_name) = input.username.as_ref().filter(|n| **n != username) {
        if store.users.contains_key(new_name) {
            return Err((StatusCode::BAD_REQUEST, format!("{new_name} already exists")));
        }
    }
    let mut user = store
        .users
        .remove(&username)
        .ok_or_else(|| not_found("User"))?;
    if let Some(new_name) = input.username {
        user.username = new_name;
    }
    if let Some(password) = input.password {
        user.password = password;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(birthday) = input.birthday {
        user.birthday = Some(birthday);
    }
    if user.username != username {
        for owner in store.sessions.values_mut().filter(|o| **o == username) {
            owner.clone_from(&user.username);
        }
    }
    store.users.insert(user.username.clone(), user.clone());
    Ok(Json(user))
}

async fn delete_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    store
        .users
        .remove(&username)
        .ok_or_else(|| not_found("User"))?;
    store.sessions.retain(|_, owner| *owner != username);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_favorite(
    State(db): State<Db>,
    Path((username, movie_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<Movie>> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    let user = store.users.get(&username).ok_or_else(|| not_found("User"))?;
    if !user.favorite_movies.contains(&movie_id) {
        return Err(not_found("Favorite movie"));
    }
    store
        .movies
        .iter()
        .find(|m| m.id == movie_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Movie"))
}

async fn add_favorite(
    State(db): State<Db>,
    Path((username, movie_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    if !store.movies.iter().any(|m| m.id == movie_id) {
        return Err(not_found("Movie"));
    }
    let user = store
        .users
        .get_mut(&username)
        .ok_or_else(|| not_found("User"))?;
    if !user.favorite_movies.contains(&movie_id) {
        user.favorite_movies.push(movie_id);
    }
    Ok(Json(user.clone()))
}

async fn remove_favorite(
    State(db): State<Db>,
    Path((username, movie_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    let user = store
        .users
        .get_mut(&username)
        .ok_or_else(|| not_found("User"))?;
    user.favorite_movies.retain(|id| *id != movie_id);
    Ok(Json(user.clone()))
}

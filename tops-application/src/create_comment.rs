use super::*;

/// Create a new comment on behalf of `user`.
///
/// The comment is stored with `user` as its author and
/// returned with the assigned id and timestamp.
pub fn create_comment(
    connections: &sqlite::Connections,
    user: &CurrentUser,
    comment: DeliveryServiceRequestComment,
) -> Result<DeliveryServiceRequestComment> {
    connections.exclusive()?.transaction(|tx| {
        let info = ApiInfo::new(user.clone(), Params::new(), tx);
        let mut resource = CommentResource::with_comment(&info, comment);
        handlers::create_handler(&mut resource).inspect_err(|err| {
            warn!("Failed to create comment as user {}: {err}", user.id);
        })?;
        Ok::<_, ApiError>(resource.into_comment())
    })
}

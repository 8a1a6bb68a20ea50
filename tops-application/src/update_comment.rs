use super::*;

/// Replace the request and the text of an existing comment.
///
/// The comment is identified by the `id` parameter and
/// can only be updated by its author.
pub fn update_comment(
    connections: &sqlite::Connections,
    user: &CurrentUser,
    params: Params,
    comment: DeliveryServiceRequestComment,
) -> Result<DeliveryServiceRequestComment> {
    connections.exclusive()?.transaction(|tx| {
        let info = ApiInfo::new(user.clone(), params, tx);
        let mut resource = CommentResource::with_comment(&info, comment);
        handlers::update_handler(&mut resource, &info.params)?;
        Ok::<_, ApiError>(resource.into_comment())
    })
}

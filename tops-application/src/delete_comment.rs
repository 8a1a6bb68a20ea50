use super::*;

pub fn delete_comment(
    connections: &sqlite::Connections,
    user: &CurrentUser,
    params: Params,
) -> Result<()> {
    connections.exclusive()?.transaction(|tx| {
        let info = ApiInfo::new(user.clone(), params, tx);
        let mut resource = CommentResource::new(&info);
        handlers::delete_handler(&mut resource, &info.params)
    })
}
